use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::time_spec::{END_SENTINEL, START_SENTINEL};

/// One playlist entry: a media file restricted to the `start`..`end` window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(alias = "videoPath")]
    pub media_path: PathBuf,
    #[serde(default)]
    pub cover_path: PathBuf,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
}

fn default_start() -> String {
    START_SENTINEL.to_string()
}

fn default_end() -> String {
    END_SENTINEL.to_string()
}

impl Track {
    /// Title used for display, falling back to the media file stem.
    pub fn display_title(&self) -> String {
        if !self.title.trim().is_empty() {
            return self.title.trim().to_string();
        }
        self.media_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    }

    /// Resolve relative media and cover paths against `base`.
    pub(super) fn rebase(mut self, base: &Path) -> Self {
        if self.media_path.is_relative() {
            self.media_path = base.join(&self.media_path);
        }
        if !self.cover_path.as_os_str().is_empty() && self.cover_path.is_relative() {
            self.cover_path = base.join(&self.cover_path);
        }
        self
    }
}
