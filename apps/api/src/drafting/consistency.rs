//! Character consistency scan.
//!
//! Recurring characters ("Brunette Girl", "Main Character") must look the
//! same from shot to shot, but the only durable record of how they look is
//! the prompt text already written for earlier shots. This module scans
//! those prompts for mentions of the selected characters and pulls out the
//! costume fragments, so context assembly can feed them back to the model.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::shot::ShotRecord;

/// One prior shot in which a character appears.
#[derive(Debug, Clone)]
pub struct Appearance {
    pub shot_title: String,
    pub prompt: String,
}

/// Everything known about a character from prior prompt text.
#[derive(Debug, Clone, Default)]
pub struct CharacterDetails {
    pub appearances: Vec<Appearance>,
    pub costumes: Vec<String>,
}

fn costume_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)wearing\s+([^.]+)").expect("costume pattern"))
}

fn appearance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)She\s+(is\s+wearing|has|wears)\s+([^.]+)").expect("appearance pattern")
    })
}

/// Scans all shots with prompt text for mentions of each selected character.
///
/// A shot counts as an appearance when its prompt or its `character` field
/// contains the character name, case-insensitively. Characters with no
/// appearances are omitted from the result; order follows `selected`.
pub fn analyze_character_consistency(
    shots: &[ShotRecord],
    selected: &[String],
) -> Vec<(String, CharacterDetails)> {
    let mut result = Vec::new();

    for name in selected {
        let needle = name.to_lowercase();
        if needle.is_empty() {
            continue;
        }

        let mut details = CharacterDetails::default();

        for shot in shots.iter().filter(|s| !s.prompt.is_empty()) {
            let in_prompt = shot.prompt.to_lowercase().contains(&needle);
            let in_character = shot.character.to_lowercase().contains(&needle);
            if !in_prompt && !in_character {
                continue;
            }

            details.appearances.push(Appearance {
                shot_title: shot.title.clone(),
                prompt: shot.prompt.clone(),
            });

            for m in costume_re().find_iter(&shot.prompt) {
                details.costumes.push(m.as_str().to_string());
            }
            for m in appearance_re().find_iter(&shot.prompt) {
                details.costumes.push(m.as_str().to_string());
            }
        }

        if !details.appearances.is_empty() {
            result.push((name.clone(), details));
        }
    }

    result
}
