use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::{AspectPreset, EditorSettings};

const APP_DIR: &str = "framecut";
const APP_CONFIG_FILE: &str = "config.json";

/// Settings from `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub handle_tolerance: Option<f64>,
    #[serde(default)]
    pub max_replica_count: Option<u32>,
    #[serde(default)]
    pub default_preset: Option<AspectPreset>,
}

impl AppConfig {
    pub fn editor_settings(&self) -> EditorSettings {
        let defaults = EditorSettings::default();
        EditorSettings {
            handle_tolerance: self
                .handle_tolerance
                .filter(|tolerance| tolerance.is_finite() && *tolerance >= 0.0)
                .unwrap_or(defaults.handle_tolerance),
            max_replica_count: self
                .max_replica_count
                .filter(|count| *count >= 1)
                .unwrap_or(defaults.max_replica_count),
            default_preset: self.default_preset.unwrap_or(defaults.default_preset),
        }
    }
}

/// Reads `config.json` from the user's config directory.
pub fn load_app_config() -> AppConfig {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

/// Missing, unreadable and malformed files all yield the default config.
pub fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let Some(path) = config_file_path(xdg_config_home, home) else {
        tracing::debug!("no config directory; using defaults");
        return AppConfig::default();
    };
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return AppConfig::default(),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            return AppConfig::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|err| {
        tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
        AppConfig::default()
    })
}

/// `$XDG_CONFIG_HOME/framecut/config.json`, or `$HOME/.config/...` when the
/// XDG variable is unset or empty.
pub fn config_file_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let root = xdg_config_home
        .filter(|path| !path.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| home.map(|home| home.join(".config")))?;
    Some(root.join(APP_DIR).join(APP_CONFIG_FILE))
}
