//! The JSON widget settings document: a profile plus the track list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::model::Track;
use super::time_spec::parse_time_spec;

pub const DEFAULT_PROFILE_NAME: &str = "Unknown User";
pub const DEFAULT_CONTACT_ID: &str = "c0n1cal";
pub const DEFAULT_AVATAR_PATH: &str = "images/avatar.jpg";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    /// Identifier offered by the copy-to-clipboard action.
    pub contact_id: String,
    pub avatar_path: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            contact_id: DEFAULT_CONTACT_ID.to_string(),
            avatar_path: DEFAULT_AVATAR_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetSettings {
    pub profile: Profile,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    name: Option<String>,
    discord: Option<String>,
    avatar_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    profile: RawProfile,
    #[serde(default)]
    tracks: Vec<Track>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self {
            name: non_blank(raw.name).unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string()),
            contact_id: raw.discord.unwrap_or_else(|| DEFAULT_CONTACT_ID.to_string()),
            avatar_path: non_blank(raw.avatar_path)
                .unwrap_or_else(|| DEFAULT_AVATAR_PATH.to_string()),
        }
    }
}

impl WidgetSettings {
    /// Parse a settings document. Relative track paths resolve against `base`.
    pub fn from_json(json: &str, base: &Path) -> Result<Self, serde_json::Error> {
        let raw: RawSettings = serde_json::from_str(json)?;
        let tracks: Vec<Track> = raw.tracks.into_iter().map(|t| t.rebase(base)).collect();

        for (i, track) in tracks.iter().enumerate() {
            for (field, spec) in [("start", &track.start), ("end", &track.end)] {
                if let Err(e) = parse_time_spec(spec) {
                    warn!(track = i, field, "malformed time spec treated as 0s: {e}");
                }
            }
        }

        Ok(Self {
            profile: raw.profile.into(),
            tracks,
        })
    }

    /// Read and parse the settings document at `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let settings = Self::from_json(&json, base).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            tracks = settings.tracks.len(),
            "loaded widget settings"
        );
        Ok(settings)
    }
}
