// Shot CRUD: list (with first-run seeding), add, patch, delete.

pub mod handlers;

use crate::models::shot::ShotRecord;

/// Built-in sample shots, seeded on the first list request against an empty
/// collection so a fresh install is not a blank screen.
pub fn sample_shots() -> Vec<ShotRecord> {
    vec![
        ShotRecord {
            id: "shot_1".to_string(),
            title: "Opening Scene: Dance Studio Setup".to_string(),
            character: "Main Character".to_string(),
            description: "Wide establishing shot of the dance studio with mirrors and barres"
                .to_string(),
            ..Default::default()
        },
        ShotRecord {
            id: "shot_2".to_string(),
            title: "Interview: Pre-Competition Nerves".to_string(),
            character: "Brunette Girl".to_string(),
            description:
                "Close-up talking head shot expressing nervousness about upcoming performance"
                    .to_string(),
            ..Default::default()
        },
    ]
}
