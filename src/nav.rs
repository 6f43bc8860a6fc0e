//! Table of contents.
//!
//! One entry per rendered heading, in document order. Section headings become
//! `toc-category` entries; topic headings are indented `toc-topic` entries.
//! The same header-offset scroll arithmetic is shared by navigation entries
//! and search results.

use crate::render::{Heading, HeadingLevel};
use maud::{Markup, html};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
}

impl NavEntry {
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }

    pub fn class(&self) -> &'static str {
        match self.level {
            HeadingLevel::Category => "toc-category",
            HeadingLevel::Topic => "toc-topic",
        }
    }
}

pub fn build_toc(headings: &[Heading]) -> Vec<NavEntry> {
    headings
        .iter()
        .map(|h| NavEntry {
            id: h.id.clone(),
            text: h.text.clone(),
            level: h.level,
        })
        .collect()
}

/// Entries for `#toc-nav-container`.
pub fn render_toc(entries: &[NavEntry]) -> Markup {
    html! {
        @for entry in entries {
            a class=(entry.class()) href=(entry.href()) { (entry.text) }
        }
    }
}

/// Document scroll position that puts an element's top `header_offset`
/// below the viewport top.
///
/// `element_top` is the element's current viewport-relative top
/// (`getBoundingClientRect().top`) and `page_y_offset` the current scroll.
pub fn scroll_target(element_top: f64, page_y_offset: f64, header_offset: u32) -> f64 {
    element_top + page_y_offset - f64::from(header_offset)
}
