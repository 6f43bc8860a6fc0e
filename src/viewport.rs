//! Viewport observation primitives shared by the scrollspy and the reveal
//! animator.
//!
//! These mirror the browser's `IntersectionObserver` closely enough that the
//! page runtime can pass a batch of entries straight through: the generator
//! serialises [`ObserverOptions`] into the runtime config, and each callback
//! batch maps to a `Vec<IntersectionEntry>`.

use crate::config::{RevealConfig, ScrollspyConfig};
use serde::Serialize;
use std::fmt;

/// One observed element's state in a callback batch.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// Element id (heading id or topic id).
    pub target: String,
    pub is_intersecting: bool,
    /// Viewport-relative top at notification time.
    pub top: f64,
}

impl IntersectionEntry {
    pub fn new(target: impl Into<String>, is_intersecting: bool, top: f64) -> Self {
        Self {
            target: target.into(),
            is_intersecting,
            top,
        }
    }
}

/// A single `rootMargin` component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    Px(i64),
    Percent(i64),
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Margin::Px(v) => write!(f, "{v}px"),
            Margin::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// `rootMargin` in CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Margin,
    pub right: Margin,
    pub bottom: Margin,
    pub left: Margin,
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverOptions {
    #[serde(serialize_with = "serialize_display")]
    pub root_margin: RootMargin,
    pub threshold: f64,
}

fn serialize_display<S: serde::Serializer>(
    value: &RootMargin,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl ObserverOptions {
    /// Region shrunk from the top by a fixed header band and from the bottom
    /// by a share of the viewport height.
    pub fn scrollspy(config: &ScrollspyConfig) -> Self {
        Self {
            root_margin: RootMargin {
                top: Margin::Px(-i64::from(config.top_margin)),
                right: Margin::Px(0),
                bottom: Margin::Percent(-i64::from(config.bottom_margin_percent)),
                left: Margin::Px(0),
            },
            threshold: config.threshold,
        }
    }

    pub fn reveal(config: &RevealConfig) -> Self {
        Self {
            root_margin: RootMargin {
                top: Margin::Px(0),
                right: Margin::Px(0),
                bottom: Margin::Px(-i64::from(config.bottom_margin)),
                left: Margin::Px(0),
            },
            threshold: config.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrollspy_margin_css() {
        let options = ObserverOptions::scrollspy(&ScrollspyConfig::default());
        assert_eq!(options.root_margin.to_string(), "-80px 0px -75% 0px");
        assert_eq!(options.threshold, 0.1);
    }

    #[test]
    fn reveal_margin_css() {
        let options = ObserverOptions::reveal(&RevealConfig::default());
        assert_eq!(options.root_margin.to_string(), "0px 0px -50px 0px");
    }

    #[test]
    fn options_serialize_for_runtime() {
        let options = ObserverOptions::reveal(&RevealConfig::default());
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["rootMargin"], "0px 0px -50px 0px");
        assert_eq!(json["threshold"], 0.1);
    }

    #[test]
    fn large_margins_do_not_wrap() {
        let config = ScrollspyConfig {
            top_margin: u32::MAX,
            ..ScrollspyConfig::default()
        };
        let options = ObserverOptions::scrollspy(&config);
        assert_eq!(options.root_margin.to_string(), "-4294967295px 0px -75% 0px");
    }
}
