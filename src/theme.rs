use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, TextStyle};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Optional stylesheet
// ---------------------------------------------------------------------------

/// Look-and-feel overrides read from a JSON file, e.g.
///
/// ```json
/// { "dark_mode": false, "accent": "#2e8b57", "body_size": 15.0 }
/// ```
///
/// Every field is optional; anything unset keeps egui's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub dark_mode: Option<bool>,
    /// `#rrggbb` used for selections and highlights.
    pub accent: Option<String>,
    /// `#rrggbb` background of side and central panels.
    pub panel_fill: Option<String>,
    pub body_size: Option<f32>,
    pub heading_size: Option<f32>,
}

impl Theme {
    /// Read the theme file. `Ok(None)` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Theme>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        let theme: Theme = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(theme))
    }

    /// Never fails: a missing file is silent, a broken one is logged.
    pub fn load_or_default(path: &Path) -> Theme {
        match Theme::load(path) {
            Ok(Some(theme)) => {
                log::info!("Using stylesheet {}", path.display());
                theme
            }
            Ok(None) => {
                log::debug!("No stylesheet at {}", path.display());
                Theme::default()
            }
            Err(e) => {
                log::warn!("Ignoring stylesheet: {e:#}");
                Theme::default()
            }
        }
    }

    /// Install the theme on an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let accent = self.accent.as_deref().and_then(parse_hex);
        let panel_fill = self.panel_fill.as_deref().and_then(parse_hex);

        ctx.style_mut(|style| {
            if let Some(dark) = self.dark_mode {
                style.visuals = if dark {
                    egui::Visuals::dark()
                } else {
                    egui::Visuals::light()
                };
            }
            if let Some(c) = accent {
                style.visuals.selection.bg_fill = c;
                style.visuals.hyperlink_color = c;
            }
            if let Some(c) = panel_fill {
                style.visuals.panel_fill = c;
            }
            if let Some(size) = self.body_size.filter(|s| *s > 0.0) {
                for ts in [TextStyle::Body, TextStyle::Button] {
                    if let Some(font) = style.text_styles.get_mut(&ts) {
                        font.size = size;
                    }
                }
            }
            if let Some(size) = self.heading_size.filter(|s| *s > 0.0) {
                if let Some(font) = style.text_styles.get_mut(&TextStyle::Heading) {
                    font.size = size;
                }
            }
        });
    }
}

/// Parse `#rrggbb` (the `#` is optional).
pub fn parse_hex(s: &str) -> Option<Color32> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn hex_colours() {
        assert_eq!(parse_hex("#2e8b57"), Some(Color32::from_rgb(0x2e, 0x8b, 0x57)));
        assert_eq!(parse_hex("FFFFFF"), Some(Color32::WHITE));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        assert_eq!(Theme::load(&path).unwrap(), None);
        assert_eq!(Theme::load_or_default(&path), Theme::default());
    }

    #[test]
    fn partial_theme_parses() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r##"{{"dark_mode": true, "accent": "#00ff00"}}"##).unwrap();
        let theme = Theme::load(tmp.path()).unwrap().unwrap();
        assert_eq!(theme.dark_mode, Some(true));
        assert_eq!(theme.body_size, None);
    }

    #[test]
    fn malformed_theme_falls_back_to_default() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "body {{ color: red; }}").unwrap();
        assert!(Theme::load(tmp.path()).is_err());
        assert_eq!(Theme::load_or_default(tmp.path()), Theme::default());
    }
}
