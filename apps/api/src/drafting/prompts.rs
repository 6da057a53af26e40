//! Prompt context assembly for the drafting workflow.
//!
//! The show bible and output rules are fixed text; everything in between is
//! assembled per request from the shot, the form selections, and the
//! character-consistency scan. Keeping the model on-style depends far more
//! on the example prompts section than on any instruction wording, so the
//! builders always include up to [`MAX_EXAMPLE_PROMPTS`] prior prompts.

use serde::Deserialize;

use crate::drafting::consistency::CharacterDetails;
use crate::models::shot::ShotRecord;

/// Prior prompts quoted as style examples in the drafting context, and as
/// character references in the revision context.
pub const MAX_EXAMPLE_PROMPTS: usize = 5;

/// System prompt for first-draft generation: the show bible.
pub const DRAFT_SYSTEM: &str = "\
You are generating prompts for AI video generation for \"StarQuest\", a Dance Moms style \
reality TV show: a dance competition featuring young dancers (ages 6-13) in a high-pressure \
competitive environment.

VISUAL STYLE: Reality television cinematography with:
- Handheld camera feel for authenticity
- Bright, harsh competition lighting when on stage
- Dramatic close-ups for emotional moments
- Multiple camera angles capturing reactions
- High-energy, fast-paced editing style

SHOW ELEMENTS TO INCLUDE:
- Sparkly, colorful dance costumes with sequins and rhinestones
- Dramatic stage makeup and elaborate hairstyles
- Competitive pressure and emotional stakes
- Backstage drama and preparation
- Dance studio environments with mirrors and barres
- Award ceremonies and trophy presentations
- Parent and coach interactions
- Various dance styles (contemporary, jazz, lyrical, hip-hop)";

/// System prompt for feedback-driven revision.
pub const REVISE_SYSTEM: &str = "\
You are an expert video prompt engineer for \"StarQuest\", a Dance Moms style reality TV \
show about competitive dance. You update video generation prompts based on user feedback \
about the generated video.

CONTEXT: StarQuest features young competitive dancers, dramatic stage lighting, sequined \
costumes, and the intense atmosphere of dance competitions. The aesthetic matches the \
glossy, dramatic style of Dance Moms with professional competition staging.";

const OUTPUT_RULES: &str = "\
GENERATE: A single paragraph prompt (2-4 sentences maximum) in the exact same style and \
length as the examples above.

CRITICAL FORMATTING RULES:
- NO markdown formatting (##, *, -, etc.)
- NO headers or titles
- NO bullet points or lists
- NO line breaks within the prompt
- Just plain text in paragraph format
- Start directly with the description

Write a natural, flowing description that matches the examples exactly in style, tone, and \
length.";

/// Free-form selections from the drafting form. Every field is optional;
/// empty selections are simply left out of the assembled context.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptFormData {
    pub shot_style: Vec<String>,
    pub setting: Vec<String>,
    pub characters: Vec<String>,
    pub costume: Vec<String>,
    pub emotion: Vec<String>,
    pub additional_details: String,
}

/// Assembles the user-message context for a first draft.
pub fn build_draft_context(
    form: &PromptFormData,
    consistency: &[(String, CharacterDetails)],
    shot: &ShotRecord,
    all_shots: &[ShotRecord],
) -> String {
    let mut context = String::new();

    if !consistency.is_empty() {
        context.push_str("CHARACTER CONSISTENCY (maintain these details):\n");
        for (name, details) in consistency {
            let Some(latest) = details.appearances.last() else {
                continue;
            };
            context.push_str(&format!(
                "- {name}: Based on previous appearances, particularly in \"{}\"\n",
                latest.shot_title
            ));
            let recent_costumes: Vec<_> = details
                .costumes
                .iter()
                .rev()
                .take(2)
                .rev()
                .cloned()
                .collect();
            if !recent_costumes.is_empty() {
                context.push_str(&format!("  Costume style: {}\n", recent_costumes.join(", ")));
            }
        }
        context.push('\n');
    }

    context.push_str(&format!(
        "CURRENT SHOT DETAILS:\n- Title: {}\n- Character: {}\n- Description: {}\n\n",
        shot.title,
        non_empty_or(&shot.character, "Not specified"),
        non_empty_or(&shot.description, "Not provided"),
    ));

    push_selection(&mut context, "Shot Style", &form.shot_style);
    push_selection(&mut context, "Setting", &form.setting);
    push_selection(&mut context, "Character Details", &form.characters);
    push_selection(&mut context, "Wardrobe", &form.costume);
    push_selection(&mut context, "Emotional Tone", &form.emotion);
    if !form.additional_details.is_empty() {
        context.push_str(&format!("Actions & Details: {}\n", form.additional_details));
    }

    let examples: Vec<_> = all_shots
        .iter()
        .filter(|s| !s.prompt.trim().is_empty())
        .take(MAX_EXAMPLE_PROMPTS)
        .collect();
    if !examples.is_empty() {
        context.push_str("\nEXAMPLE PROMPTS FROM THIS PROJECT (match this style and length):\n");
        for (i, example) in examples.iter().enumerate() {
            context.push_str(&format!("{}. \"{}\"\n\n", i + 1, example.prompt));
        }
    }

    context.push('\n');
    context.push_str(OUTPUT_RULES);
    context
}

/// Assembles the user-message context for a feedback revision.
///
/// `references` are other shots' prompts, used to keep recurring characters
/// consistent while the current prompt is being rewritten.
pub fn build_revision_context(
    current_prompt: &str,
    feedback: &str,
    references: &[String],
) -> String {
    let reference_block = if references.is_empty() {
        "No existing character references available.".to_string()
    } else {
        references
            .iter()
            .enumerate()
            .map(|(i, prompt)| format!("{}. {prompt}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "CHARACTER CONSISTENCY: When characters are mentioned (like \"brunette girl\"), \
maintain consistency with these existing character references from other shots:\n\
{reference_block}\n\n\
CURRENT PROMPT:\n\"{current_prompt}\"\n\n\
USER FEEDBACK ABOUT THE GENERATED VIDEO:\n\"{feedback}\"\n\n\
TASK: Analyze the feedback and update the prompt to address the issues. Common feedback types:\n\
- Lighting issues: \"too dark\" -> add \"bright stage lighting\", \"dramatic spotlight\"\n\
- Character issues: \"doesn't match character\" -> strengthen character details, reference hair/costume colors\n\
- Movement issues: \"not enough action\" -> add specific dance moves, \"energetic choreography\"\n\
- Setting issues: \"wrong background\" -> specify \"competition stage\", \"dance studio\"\n\
- Costume issues: \"wrong outfit\" -> add specific sequin/color details\n\n\
REQUIREMENTS:\n\
1. Keep the prompt natural language, single paragraph, 2-4 sentences\n\
2. NO markdown, headers, bullet points, or formatting\n\
3. Address the specific feedback while maintaining the overall shot concept\n\
4. Keep character consistency with existing references\n\
5. Maintain the StarQuest aesthetic\n\
6. Be specific about visual details but concise\n\n\
Return ONLY the updated prompt, nothing else."
    )
}

fn push_selection(context: &mut String, label: &str, values: &[String]) {
    if !values.is_empty() {
        context.push_str(&format!("{label}: {}\n", values.join(", ")));
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
