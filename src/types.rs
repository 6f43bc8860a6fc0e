//! Content document types shared by the loader, renderer and generator.
//!
//! The content document is the single JSON input of a build. Its shape is:
//!
//! ```json
//! {
//!   "sections": [
//!     {
//!       "id": "basics",
//!       "title": "Basics",
//!       "topics": [
//!         {
//!           "id": "variables",
//!           "title": "Variables",
//!           "icon": "<svg>...</svg>",
//!           "content": {
//!             "description": "Bindings are <code>let</code> by default.",
//!             "code": "let x = 5;"
//!           }
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `icon`, `description` and `code` are trusted markup: they are inserted into
//! the page without escaping. Ids share one namespace across sections and
//! topics because both become `#id` anchors on the same page.

use serde::{Deserialize, Serialize};

/// The whole content document, in render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A top-level category: one `h2` plus its topic blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// A single entry within a section.
///
/// Topics without a title render their body but get no sub-heading, no
/// navigation entry and no search record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Inline markup shown before the title text (usually an SVG).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub content: TopicContent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Topic {
    /// Title, if present and non-empty. A whitespace-only title still
    /// counts and renders an (empty) sub-heading.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

impl ContentDocument {
    /// Total number of topics across all sections.
    pub fn topic_count(&self) -> usize {
        self.sections.iter().map(|s| s.topics.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_deserialize() {
        let json = r#"{"sections":[{"id":"a","title":"A","topics":[{"id":"t"}]}]}"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();
        let topic = &doc.sections[0].topics[0];
        assert_eq!(topic.title, None);
        assert_eq!(topic.content, TopicContent::default());
    }

    #[test]
    fn empty_title_counts_as_absent() {
        let topic = Topic {
            id: "t".into(),
            title: Some(String::new()),
            icon: None,
            content: TopicContent::default(),
        };
        assert_eq!(topic.title(), None);
    }

    #[test]
    fn whitespace_title_is_kept() {
        let topic = Topic {
            id: "t".into(),
            title: Some("   ".into()),
            icon: None,
            content: TopicContent::default(),
        };
        assert_eq!(topic.title(), Some("   "));
    }

    #[test]
    fn topic_count_spans_sections() {
        let json = r#"{"sections":[
            {"id":"a","title":"A","topics":[{"id":"1"},{"id":"2"}]},
            {"id":"b","title":"B","topics":[{"id":"3"}]}
        ]}"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.topic_count(), 3);
    }
}
