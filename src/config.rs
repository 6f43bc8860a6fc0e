//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The config file
//! lives next to `content.json` in the source directory; stock defaults are
//! overridden by whatever keys the user file sets.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml              # Site config (optional)
//! └── content.json             # Content document
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_file = "content.json"  # Relative to the source directory
//! # content_url = "https://example.com/content.json"  # Overrides content_file
//!
//! [site]
//! title = "Reference"
//!
//! [theme]
//! default = "dark"          # Applied when no preference is stored
//! storage_key = "theme"     # localStorage key for the preference
//!
//! [search]
//! max_results = 10
//! context_before = 20       # Snippet characters before the first match
//! context_after = 30        # Snippet characters after the match
//!
//! [navigation]
//! header_offset = 70        # Sticky header height subtracted when scrolling
//!
//! [scrollspy]
//! top_margin = 80           # Pixels cut from the top of the observed region
//! bottom_margin_percent = 75
//! threshold = 0.1
//!
//! [reveal]
//! bottom_margin = 50        # Blocks reveal this many pixels early
//! threshold = 0.1
//!
//! [copy]
//! label = "Copy"
//! copied_label = "Copied!"
//! revert_ms = 2000
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f4f4f5"
//! text = "#18181b"
//! text_muted = "#71717a"
//! border = "#e4e4e7"
//! accent = "#2563eb"
//!
//! [colors.dark]
//! background = "#0b0d12"
//! surface = "#151922"
//! text = "#e5e7eb"
//! text_muted = "#9ca3af"
//! border = "#262b36"
//! accent = "#60a5fa"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content document path, relative to the source directory.
    pub content_file: String,
    /// Remote content document. Takes precedence over `content_file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    pub site: SiteMeta,
    pub theme: ThemeConfig,
    pub colors: ColorConfig,
    pub search: SearchConfig,
    pub navigation: NavigationConfig,
    pub scrollspy: ScrollspyConfig,
    pub reveal: RevealConfig,
    pub copy: CopyConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_file: "content.json".to_string(),
            content_url: None,
            site: SiteMeta::default(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
            search: SearchConfig::default(),
            navigation: NavigationConfig::default(),
            scrollspy: ScrollspyConfig::default(),
            reveal: RevealConfig::default(),
            copy: CopyConfig::default(),
        }
    }
}

/// Upper bound for pixel margins and offsets.
const MAX_OFFSET_PX: u32 = 10_000;

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_file.trim().is_empty() && self.content_url.is_none() {
            return Err(ConfigError::Validation(
                "content_file must not be empty".into(),
            ));
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::Validation(
                "search.max_results must be at least 1".into(),
            ));
        }
        if self.scrollspy.bottom_margin_percent > 100 {
            return Err(ConfigError::Validation(
                "scrollspy.bottom_margin_percent must be 0-100".into(),
            ));
        }
        for (name, px) in [
            ("scrollspy.top_margin", self.scrollspy.top_margin),
            ("reveal.bottom_margin", self.reveal.bottom_margin),
            ("navigation.header_offset", self.navigation.header_offset),
        ] {
            if px > MAX_OFFSET_PX {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at most {MAX_OFFSET_PX}"
                )));
            }
        }
        for (name, threshold) in [
            ("scrollspy.threshold", self.scrollspy.threshold),
            ("reveal.threshold", self.reveal.threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Validation(format!("{name} must be 0.0-1.0")));
            }
        }
        if self.theme.storage_key.is_empty() {
            return Err(ConfigError::Validation(
                "theme.storage_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Page `<title>` and header brand text.
    pub title: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Reference".to_string(),
        }
    }
}

/// Theme preference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme used when nothing (or garbage) is stored.
    pub default: Theme,
    /// `localStorage` key holding `"light"` or `"dark"`.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Theme::Dark,
            storage_key: "theme".to_string(),
        }
    }
}

/// Search matcher limits and snippet window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub max_results: usize,
    pub context_before: usize,
    pub context_after: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            context_before: 20,
            context_after: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Height of the sticky header; scroll targets land this far below the top.
    pub header_offset: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            header_offset: 70,
        }
    }
}

/// Heading observer region for the scrollspy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollspyConfig {
    pub top_margin: u32,
    pub bottom_margin_percent: u32,
    pub threshold: f64,
}

impl Default for ScrollspyConfig {
    fn default() -> Self {
        Self {
            top_margin: 80,
            bottom_margin_percent: 75,
            threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub bottom_margin: u32,
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            bottom_margin: 50,
            threshold: 0.1,
        }
    }
}

/// Copy-button labels and how long the confirmation stays up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    pub label: String,
    pub copied_label: String,
    pub revert_ms: u64,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            label: "Copy".to_string(),
            copied_label: "Copied!".to_string(),
            revert_ms: 2000,
        }
    }
}

/// Color configuration for light and dark themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Code blocks, search panel, navigation panel.
    pub surface: String,
    pub text: String,
    /// Navigation entries and search result paths.
    pub text_muted: String,
    pub border: String,
    /// Links, active navigation entry, highlight marks.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f4f4f5".to_string(),
            text: "#18181b".to_string(),
            text_muted: "#71717a".to_string(),
            border: "#e4e4e7".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0d12".to_string(),
            surface: "#151922".to_string(),
            text: "#e5e7eb".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#262b36".to_string(),
            accent: "#60a5fa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory, merged over the
/// stock defaults and validated.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Docs Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Content document, relative to the source directory.
content_file = "content.json"

# Fetch the content document over HTTP(S) instead. Overrides content_file.
# content_url = "https://example.com/content.json"

[site]
# Page <title> and header brand.
title = "Reference"

# ---------------------------------------------------------------------------
# Theme preference
# ---------------------------------------------------------------------------
[theme]
# "light" or "dark". Used when the visitor has no stored preference.
default = "dark"

# localStorage key the preference is persisted under.
storage_key = "theme"

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Results shown per query, in document order.
max_results = 10

# Snippet window around the first match, in characters.
context_before = 20
context_after = 30

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Sticky header height. Navigation lands headings this far below the top.
header_offset = 70

# ---------------------------------------------------------------------------
# Scrollspy: which heading is "current"
# ---------------------------------------------------------------------------
[scrollspy]
top_margin = 80
# Bottom part of the viewport (percent of its height) ignored by the observer.
bottom_margin_percent = 75
threshold = 0.1

# ---------------------------------------------------------------------------
# Reveal animation for topic blocks
# ---------------------------------------------------------------------------
[reveal]
# Reveal blocks this many pixels before they reach the viewport bottom.
bottom_margin = 50
threshold = 0.1

# ---------------------------------------------------------------------------
# Copy buttons on code blocks
# ---------------------------------------------------------------------------
[copy]
label = "Copy"
copied_label = "Copied!"
revert_ms = 2000

# ---------------------------------------------------------------------------
# Colors - Light theme ([data-theme="light"])
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f4f4f5"       # Code blocks, panels
text = "#18181b"
text_muted = "#71717a"    # Navigation, result paths
border = "#e4e4e7"
accent = "#2563eb"        # Links, active entry, highlights

# ---------------------------------------------------------------------------
# Colors - Dark theme ([data-theme="dark"])
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0d12"
surface = "#151922"
text = "#e5e7eb"
text_muted = "#9ca3af"
border = "#262b36"
accent = "#60a5fa"
"##
}

/// Generate CSS custom properties from color config.
///
/// Themes are selected by the `data-theme` attribute on `<html>`, which the
/// page runtime sets from the stored preference.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        "{}\n\n{}",
        scheme_css(":root, [data-theme=\"dark\"]", &colors.dark),
        scheme_css("[data-theme=\"light\"]", &colors.light),
    )
}

fn scheme_css(selector: &str, scheme: &ColorScheme) -> String {
    format!(
        r#"{selector} {{
    --color-bg: {bg};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {muted};
    --color-border: {border};
    --color-accent: {accent};
}}"#,
        bg = scheme.background,
        surface = scheme.surface,
        text = scheme.text,
        muted = scheme.text_muted,
        border = scheme.border,
        accent = scheme.accent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_page_constants() {
        let config = SiteConfig::default();
        assert_eq!(config.content_file, "content.json");
        assert_eq!(config.theme.default, Theme::Dark);
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.search.context_before, 20);
        assert_eq!(config.search.context_after, 30);
        assert_eq!(config.navigation.header_offset, 70);
        assert_eq!(config.scrollspy.top_margin, 80);
        assert_eq!(config.scrollspy.bottom_margin_percent, 75);
        assert_eq!(config.reveal.bottom_margin, 50);
        assert_eq!(config.copy.copied_label, "Copied!");
        assert_eq!(config.copy.revert_ms, 2000);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[search]
max_results = 5
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.context_before, 20);
        assert_eq!(config.theme.storage_key, "theme");
    }

    #[test]
    fn parse_theme_default() {
        let config: SiteConfig = toml::from_str("[theme]\ndefault = \"light\"\n").unwrap();
        assert_eq!(config.theme.default, Theme::Light);
    }

    #[test]
    fn invalid_theme_name_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[theme]\ndefault = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Reference");
        assert!(config.content_url.is_none());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
content_file = "docs.json"

[site]
title = "Rust Cheatsheet"

[colors.dark]
accent = "#ff8800"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.content_file, "docs.json");
        assert_eq!(config.site.title, "Rust Cheatsheet");
        assert_eq!(config.colors.dark.accent, "#ff8800");
        // Untouched keys fall back to stock values
        assert_eq!(config.colors.dark.background, "#0b0d12");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[search]\nmax_hits = 4\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base = toml::Value::Integer(1);
        let merged = merge_toml(base, toml::Value::String("two".into()));
        assert_eq!(merged.as_str(), Some("two"));
    }

    #[test]
    fn validate_zero_results_rejected() {
        let mut config = SiteConfig::default();
        config.search.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_threshold_out_of_range() {
        let mut config = SiteConfig::default();
        config.reveal.threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reveal.threshold"));
    }

    #[test]
    fn validate_bottom_margin_percent() {
        let mut config = SiteConfig::default();
        config.scrollspy.bottom_margin_percent = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_pixel_margins_bounded() {
        let mut config = SiteConfig::default();
        config.scrollspy.top_margin = u32::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scrollspy.top_margin"));

        let mut config = SiteConfig::default();
        config.reveal.bottom_margin = 3_000_000_000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reveal.bottom_margin"));

        let mut config = SiteConfig::default();
        config.scrollspy.top_margin = 10_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.content_file, defaults.content_file);
        assert_eq!(config.search.max_results, defaults.search.max_results);
        assert_eq!(config.colors.light.accent, defaults.colors.light.accent);
        assert_eq!(config.colors.dark.background, defaults.colors.dark.background);
        assert_eq!(config.copy.revert_ms, defaults.copy.revert_ms);
    }

    #[test]
    fn color_css_keys_themes_by_attribute() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#fafafa".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("[data-theme=\"light\"]"));
        assert!(css.contains("--color-bg: #fafafa"));
        assert!(css.contains("--color-bg: #0b0d12"));
    }
}
