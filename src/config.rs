use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

pub const ENV_DATA_PATH: &str = "ECO_IMPACT_DATA";
pub const ENV_STYLE_PATH: &str = "ECO_IMPACT_STYLE";
pub const ENV_TRANSLATE: &str = "ECO_IMPACT_TRANSLATE";

/// Startup settings. Paths are relative to the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Spreadsheet loaded once at startup.
    pub data_path: PathBuf,
    /// Optional theme file; missing is fine.
    pub style_path: PathBuf,
    /// Show product types through the label table.
    pub translate_labels: bool,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dataBase.csv"),
            style_path: PathBuf::from("style.json"),
            translate_labels: false,
            window_title: "Environmental Impact".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `ECO_IMPACT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }
        if let Some(path) = lookup(ENV_STYLE_PATH).filter(|v| !v.trim().is_empty()) {
            config.style_path = PathBuf::from(path.trim());
        }
        if let Some(flag) = lookup(ENV_TRANSLATE) {
            match parse_flag(&flag) {
                Some(on) => config.translate_labels = on,
                None => log::warn!("Ignoring {ENV_TRANSLATE}={flag:?}: expected a boolean"),
            }
        }
        config
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
