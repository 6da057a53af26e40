//! CSV codec for shot lists.
//!
//! The format mirrors the spreadsheets production teams actually upload:
//! first line is a header, fields may be double-quoted to protect embedded
//! commas, and the header names vary (`ID` vs `SHOT ID`, `TITLE` vs
//! `SHOT TITLE`, `LINK TO VIDEO` vs `VIDEO URL`). Parsing normalizes all of
//! that onto the fixed `ShotRecord` shape.
//!
//! Quoting is deliberately minimal: a `"` toggles quoted mode and is never
//! itself part of a field, so `""` escapes are not supported and a quoted
//! field cannot span lines. Export quotes only the free-text columns; `id`,
//! `character`, `videoUrl` and `status` are emitted bare.

use crate::models::shot::{ShotRecord, ShotStatus};

/// Fixed export header. Import accepts these names (case-insensitive) plus
/// the aliases handled in [`parse_shotlist`].
pub const EXPORT_HEADER: &str =
    "SHOT TITLE,ID,CHARACTER,DESCRIPTION,PROMPT,CAPTION,REFERENCE IMAGE,LINK TO VIDEO,STATUS";

/// Parses a CSV blob into normalized shot records.
///
/// Row-drop rules: blank lines, rows with fewer fields than the header has
/// columns, and rows whose mapped title is empty are all skipped silently.
/// A row without an id gets a synthesized `shot_<n>` where `<n>` is the
/// 1-based line index (the header is line 0).
pub fn parse_shotlist(csv_data: &str) -> Vec<ShotRecord> {
    let mut lines = csv_data.split('\n');
    let header_line = lines.next().unwrap_or_default();
    let columns: Vec<String> = header_line
        .split(',')
        .map(|cell| header_key(&cell.trim().replace('"', "")))
        .collect();

    let mut shots = Vec::new();

    for (index, line) in csv_data.split('\n').enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let values = parse_line(line);
        if values.len() < columns.len() {
            continue;
        }

        // Last duplicate header wins, as in a plain name -> value mapping.
        let field = |name: &str| -> String {
            columns
                .iter()
                .rposition(|c| c == name)
                .and_then(|i| values.get(i))
                .cloned()
                .unwrap_or_default()
        };

        let id = non_empty_or(field("id"), field("shot_id"));
        let prompt = field("prompt");

        let classified = classify_status(&field("status"));
        let status = if !prompt.trim().is_empty() {
            // A row that already carries a prompt can never sit at
            // "prompt not yet generated", whatever its status cell says.
            if classified == ShotStatus::ShotSelected {
                ShotStatus::ShotSelected
            } else {
                ShotStatus::PromptGenerated
            }
        } else {
            classified
        };

        let shot = ShotRecord {
            id: if id.is_empty() { format!("shot_{index}") } else { id },
            title: non_empty_or(field("shot_title"), field("title")),
            character: field("character"),
            description: field("description"),
            prompt,
            caption: field("caption"),
            video_url: non_empty_or(field("link_to_video"), field("video_url")),
            status,
        };

        if !shot.title.is_empty() {
            shots.push(shot);
        }
    }

    shots
}

/// Serializes shots into a CSV document with the fixed column order.
///
/// The reference-image column is always empty (the feature does not exist),
/// and `character` is emitted unquoted, so a character value containing a
/// comma will shift the row on re-import. That asymmetry is long-standing
/// behavior the existing sheets rely on; see the codec tests.
pub fn export_shotlist(shots: &[ShotRecord]) -> String {
    let mut lines = Vec::with_capacity(shots.len() + 1);
    lines.push(EXPORT_HEADER.to_string());

    for shot in shots {
        let row = [
            format!("\"{}\"", shot.title),
            shot.id.clone(),
            shot.character.clone(),
            format!("\"{}\"", shot.description),
            format!("\"{}\"", shot.prompt),
            format!("\"{}\"", shot.caption),
            String::new(),
            shot.video_url.clone(),
            shot.status.to_string(),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Classifies a raw status cell by case-insensitive substring match.
///
/// "generated" wins over "selected" when both appear, and "ready" counts as
/// generated; uploaded sheets use it for shots whose prompt text is done.
fn classify_status(raw: &str) -> ShotStatus {
    let lowered = raw.trim().to_lowercase();
    if lowered.contains("generated") || lowered.contains("ready") {
        ShotStatus::PromptGenerated
    } else if lowered.contains("selected") {
        ShotStatus::ShotSelected
    } else {
        ShotStatus::PromptNotYetGenerated
    }
}

/// Splits one CSV line into trimmed fields. A `"` toggles quoted mode (and
/// is dropped), a `,` separates fields only outside quotes.
fn parse_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// Normalizes a header cell to a lookup key: lower-cased, whitespace runs
/// joined with `_` ("SHOT TITLE" -> "shot_title").
fn header_key(cell: &str) -> String {
    cell.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn non_empty_or(primary: String, fallback: String) -> String {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_row_end_to_end() {
        let csv = "SHOT TITLE,ID,CHARACTER,DESCRIPTION,PROMPT,CAPTION,REFERENCE IMAGE,LINK TO VIDEO,STATUS\n\"Test Shot\",shot_1,\"Test Character\",\"\",\"Test prompt\",\"\",\"\",\"\",\"\"";

        let shots = parse_shotlist(csv);

        assert_eq!(shots.len(), 1);
        assert_eq!(
            shots[0],
            ShotRecord {
                id: "shot_1".to_string(),
                title: "Test Shot".to_string(),
                character: "Test Character".to_string(),
                description: String::new(),
                prompt: "Test prompt".to_string(),
                caption: String::new(),
                video_url: String::new(),
                status: ShotStatus::PromptGenerated,
            }
        );
    }

    #[test]
    fn test_status_cell_selected_beats_prompt_inference() {
        let csv = "SHOT TITLE,ID,CHARACTER,DESCRIPTION,PROMPT,CAPTION,REFERENCE IMAGE,LINK TO VIDEO,STATUS\n\"Shot\",shot_1,\"\",\"\",\"Some prompt\",\"\",\"\",\"\",\"shot selected\"";

        let shots = parse_shotlist(csv);
        assert_eq!(shots[0].status, ShotStatus::ShotSelected);
    }

    #[test]
    fn test_status_cell_ready_with_prompt_maps_to_generated() {
        let csv = "SHOT TITLE,ID,CHARACTER,DESCRIPTION,PROMPT,CAPTION,REFERENCE IMAGE,LINK TO VIDEO,STATUS\n\"Shot\",shot_1,\"\",\"\",\"Some prompt\",\"\",\"\",\"\",\"ready\"";

        let shots = parse_shotlist(csv);
        assert_eq!(shots[0].status, ShotStatus::PromptGenerated);
    }

    #[test]
    fn test_empty_prompt_and_empty_status_stay_not_yet_generated() {
        let csv = "SHOT TITLE,ID,CHARACTER,DESCRIPTION,PROMPT,CAPTION,REFERENCE IMAGE,LINK TO VIDEO,STATUS\n\"Shot\",shot_1,\"\",\"\",\"\",\"\",\"\",\"\",\"\"";

        let shots = parse_shotlist(csv);
        assert_eq!(shots[0].status, ShotStatus::PromptNotYetGenerated);
    }

    #[test]
    fn test_nonempty_prompt_never_stays_not_yet_generated() {
        let csv = "SHOT TITLE,ID,CHARACTER,DESCRIPTION,PROMPT,CAPTION,REFERENCE IMAGE,LINK TO VIDEO,STATUS\n\"Shot\",shot_1,\"\",\"\",\"A finished prompt\",\"\",\"\",\"\",\"\"";

        let shots = parse_shotlist(csv);
        assert_eq!(shots[0].status, ShotStatus::PromptGenerated);
    }

    #[test]
    fn test_quoted_fields_keep_embedded_commas() {
        let csv = "SHOT TITLE,ID,CHARACTER,DESCRIPTION,PROMPT,CAPTION,REFERENCE IMAGE,LINK TO VIDEO,STATUS\n\"Shot with, comma\",shot_1,\"Character, with comma\",\"Description, with comma\",\"\",\"\",\"\",\"\",\"\"";

        let shots = parse_shotlist(csv);
        assert_eq!(shots[0].title, "Shot with, comma");
        assert_eq!(shots[0].character, "Character, with comma");
        assert_eq!(shots[0].description, "Description, with comma");
    }

    #[test]
    fn test_header_aliases_map_onto_record_shape() {
        let csv = "TITLE,SHOT ID,VIDEO URL\nFinale,shot_7,https://example.com/v.mp4";

        let shots = parse_shotlist(csv);
        assert_eq!(shots[0].id, "shot_7");
        assert_eq!(shots[0].title, "Finale");
        assert_eq!(shots[0].video_url, "https://example.com/v.mp4");
    }

    #[test]
    fn test_missing_id_is_synthesized_from_line_index() {
        let csv = "SHOT TITLE,ID\nFirst,\nSecond,";

        let shots = parse_shotlist(csv);
        assert_eq!(shots[0].id, "shot_1");
        assert_eq!(shots[1].id, "shot_2");
    }

    #[test]
    fn test_short_row_is_dropped() {
        let csv = "SHOT TITLE,ID,CHARACTER\nOnly a title\nFull,shot_2,Someone";

        let shots = parse_shotlist(csv);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].id, "shot_2");
    }

    #[test]
    fn test_empty_title_row_is_dropped() {
        let csv = "SHOT TITLE,ID\n\"\",shot_1\nKept,shot_2";

        let shots = parse_shotlist(csv);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].id, "shot_2");
    }

    #[test]
    fn test_header_only_document_yields_empty_collection() {
        let shots = parse_shotlist(EXPORT_HEADER);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "SHOT TITLE,ID\nKept,shot_1\n\n   \nAlso kept,shot_2\n";

        let shots = parse_shotlist(csv);
        assert_eq!(shots.len(), 2);
    }

    #[test]
    fn test_export_row_format_is_fixed() {
        let shots = vec![ShotRecord {
            id: "shot_1".to_string(),
            title: "Test Shot".to_string(),
            character: "Test Character".to_string(),
            description: "Test description".to_string(),
            prompt: "Test prompt".to_string(),
            caption: "Test caption".to_string(),
            video_url: "https://example.com/video".to_string(),
            status: ShotStatus::PromptGenerated,
        }];

        let csv = export_shotlist(&shots);
        let mut lines = csv.split('\n');
        assert_eq!(lines.next(), Some(EXPORT_HEADER));
        assert_eq!(
            lines.next(),
            Some(
                "\"Test Shot\",shot_1,Test Character,\"Test description\",\"Test prompt\",\"Test caption\",,https://example.com/video,prompt generated"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_empty_store_is_exactly_the_header() {
        assert_eq!(export_shotlist(&[]), EXPORT_HEADER);
    }

    #[test]
    fn test_round_trip_preserves_ids_and_titles() {
        let original = vec![
            ShotRecord {
                id: "shot_1".to_string(),
                title: "Opening Scene".to_string(),
                prompt: "A sweeping crane shot.".to_string(),
                status: ShotStatus::ShotSelected,
                ..Default::default()
            },
            ShotRecord {
                id: "shot_2".to_string(),
                title: "Interview".to_string(),
                ..Default::default()
            },
        ];

        let reimported = parse_shotlist(&export_shotlist(&original));

        assert_eq!(reimported.len(), 2);
        assert_eq!(reimported[0].id, "shot_1");
        assert_eq!(reimported[0].title, "Opening Scene");
        assert_eq!(reimported[0].status, ShotStatus::ShotSelected);
        assert_eq!(reimported[1].id, "shot_2");
        assert_eq!(reimported[1].title, "Interview");
        // The exported cell "prompt not yet generated" contains the
        // substring "generated", so re-import normalizes the status up.
        // Round-tripping exercises the inference policy, it does not
        // preserve this one status verbatim.
        assert_eq!(reimported[1].status, ShotStatus::PromptGenerated);
    }

    #[test]
    fn test_reimport_of_comma_in_character_column_is_lossy() {
        // `character` exports unquoted, so a comma inside it splits the row.
        // This asserts the documented behavior, not a desirable one: the
        // row gains a field, and every later column shifts right by one.
        let original = vec![ShotRecord {
            id: "shot_1".to_string(),
            title: "Duet".to_string(),
            character: "Alice, Bea".to_string(),
            description: "Two dancers".to_string(),
            ..Default::default()
        }];

        let reimported = parse_shotlist(&export_shotlist(&original));

        assert_eq!(reimported.len(), 1);
        assert_eq!(reimported[0].character, "Alice");
        assert_eq!(reimported[0].description, "Bea");
        assert_eq!(reimported[0].prompt, "Two dancers");
    }
}
