//! Light/dark theme preference.
//!
//! The preference is a single key-value pair. In the browser it lives in
//! `localStorage`; here it goes through the [`Preferences`] trait so the page
//! controller can be driven against any store. Anything other than the exact
//! strings `"light"` or `"dark"` reads as "no preference".

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Durable key-value storage for the theme preference.
pub trait Preferences {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory [`Preferences`], one instance per simulated origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// What applying a theme does to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeApplication {
    /// Value of the `data-theme` attribute on `<html>`.
    pub theme: Theme,
    pub sun_visible: bool,
    pub moon_visible: bool,
}

impl ThemeApplication {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            theme,
            sun_visible: theme == Theme::Light,
            moon_visible: theme == Theme::Dark,
        }
    }
}

pub struct ThemeStore<P> {
    prefs: P,
    key: String,
    fallback: Theme,
    current: Theme,
}

impl<P: Preferences> ThemeStore<P> {
    pub fn new(prefs: P, key: impl Into<String>, fallback: Theme) -> Self {
        Self {
            prefs,
            key: key.into(),
            fallback,
            current: fallback,
        }
    }

    /// Stored preference, or the fallback when absent or unrecognised.
    pub fn load(&self) -> Theme {
        self.prefs
            .get(&self.key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.fallback)
    }

    /// Set the document theme and persist it.
    pub fn apply(&mut self, theme: Theme) -> ThemeApplication {
        self.current = theme;
        self.prefs.set(&self.key, theme.as_str());
        ThemeApplication::for_theme(theme)
    }

    pub fn toggle(&mut self) -> ThemeApplication {
        self.apply(self.current.opposite())
    }

    /// Theme currently applied to the document.
    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn into_preferences(self) -> P {
        self.prefs
    }
}
