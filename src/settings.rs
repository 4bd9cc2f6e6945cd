//! Presentation settings
//!
//! Loaded from a JSON file at startup. Gameplay tuning is not configurable;
//! these only touch how the game is shown.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Environment variable naming an alternate settings file
pub const SETTINGS_ENV: &str = "STACKER_SETTINGS";
/// Settings file looked up in the working directory by default
pub const DEFAULT_SETTINGS_FILE: &str = "stacker.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Present with vsync (fall speed is tied to frame rate)
    pub vsync: bool,
    /// Draw the block-digit score overlay
    pub show_hud: bool,
    /// Mirror the score in the window caption
    pub score_in_title: bool,
    /// env_logger filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync: true,
            show_hud: true,
            score_in_title: true,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Settings file path: `$STACKER_SETTINGS`, else `stacker.json`
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Parse settings from JSON text. Missing fields take their defaults.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json, path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Requested present mode
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.vsync);
        assert!(settings.show_hud);
        assert!(settings.score_in_title);
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.present_mode(), wgpu::PresentMode::AutoVsync);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "show_hud": false }"#, Path::new("test.json")).unwrap();
        assert!(!settings.show_hud);
        assert!(settings.vsync);
        assert!(settings.score_in_title);
    }

    #[test]
    fn test_no_vsync_present_mode() {
        let settings = Settings {
            vsync: false,
            ..Default::default()
        };
        assert_eq!(settings.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ not json", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = Path::new("definitely/not/here/stacker.json");
        assert!(Settings::load_from(path).unwrap().is_none());
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = Settings {
            log_filter: "debug".to_string(),
            score_in_title: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed = Settings::from_json(&json, Path::new("mem")).unwrap();
        assert_eq!(parsed, settings);
    }
}
