use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle marker for a shot.
///
/// The first three values form the filter/progress vocabulary; `PromptUpdated`
/// is a transient state written by the feedback-revision workflow. Unknown or
/// missing wire values normalize to `PromptNotYetGenerated`: persisted
/// documents and CSV uploads both come from outside the process and are not
/// trusted to carry a known status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ShotStatus {
    #[default]
    #[serde(rename = "prompt not yet generated")]
    PromptNotYetGenerated,
    #[serde(rename = "prompt generated")]
    PromptGenerated,
    #[serde(rename = "shot selected")]
    ShotSelected,
    #[serde(rename = "prompt updated")]
    PromptUpdated,
}

impl ShotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotStatus::PromptNotYetGenerated => "prompt not yet generated",
            ShotStatus::PromptGenerated => "prompt generated",
            ShotStatus::ShotSelected => "shot selected",
            ShotStatus::PromptUpdated => "prompt updated",
        }
    }
}

impl From<String> for ShotStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "prompt generated" => ShotStatus::PromptGenerated,
            "shot selected" => ShotStatus::ShotSelected,
            "prompt updated" => ShotStatus::PromptUpdated,
            _ => ShotStatus::PromptNotYetGenerated,
        }
    }
}

impl fmt::Display for ShotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of planned video content, tracked through the drafting/selection
/// workflow. This is the sole persisted entity; `id` is the only join key.
///
/// All fields default so that partial JSON bodies (manual add) and partial
/// persisted documents deserialize without error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShotRecord {
    pub id: String,
    pub title: String,
    pub character: String,
    pub description: String,
    pub prompt: String,
    pub caption: String,
    pub video_url: String,
    pub status: ShotStatus,
}

/// Shallow-merge patch for a shot: `None` fields leave the record untouched.
/// `id` is deliberately absent; the join key is immutable through updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShotPatch {
    pub title: Option<String>,
    pub character: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub caption: Option<String>,
    pub video_url: Option<String>,
    pub status: Option<ShotStatus>,
}

impl ShotPatch {
    /// Applies the patch onto one record, field by field.
    pub fn apply(self, shot: &mut ShotRecord) {
        if let Some(title) = self.title {
            shot.title = title;
        }
        if let Some(character) = self.character {
            shot.character = character;
        }
        if let Some(description) = self.description {
            shot.description = description;
        }
        if let Some(prompt) = self.prompt {
            shot.prompt = prompt;
        }
        if let Some(caption) = self.caption {
            shot.caption = caption;
        }
        if let Some(video_url) = self.video_url {
            shot.video_url = video_url;
        }
        if let Some(status) = self.status {
            shot.status = status;
        }
    }
}
