//! Shared test utilities for the simple-docs test suite.
//!
//! Provides a small but representative content document, a temp-dir site
//! writer, and lookups that panic with a clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let page = render_content(&sample_document(), "Copy");
//! let index = SearchIndex::build(&page);
//! let record = find_record(&index, "arrays");
//! assert_eq!(record.category, "Basics");
//! ```

use std::fs;
use tempfile::TempDir;

use crate::search::{SearchIndex, SearchRecord};
use crate::types::{ContentDocument, Section, Topic, TopicContent};

// =========================================================================
// Fixtures
// =========================================================================

/// JSON of a two-section cheatsheet.
///
/// - `basics`: `variables` (icon, markup description, code), `arrays`
///   (description only)
/// - `control-flow`: `loops` (code only), `matching` (description and code)
pub fn sample_document_json() -> String {
    r#"{
  "sections": [
    {
      "id": "basics",
      "title": "Basics",
      "topics": [
        {
          "id": "variables",
          "title": "Variables",
          "icon": "<svg class=\"icon\" viewBox=\"0 0 16 16\"></svg>",
          "content": {
            "description": "Bindings are immutable unless declared with <code>mut</code>.",
            "code": "let x = 5;<br>let mut y = 6;"
          }
        },
        {
          "id": "arrays",
          "title": "Arrays",
          "content": {
            "description": "An Array is a list"
          }
        }
      ]
    },
    {
      "id": "control-flow",
      "title": "Control Flow",
      "topics": [
        {
          "id": "loops",
          "title": "Loops",
          "content": {
            "code": "for i in 0..10 { println!(\"{i}\"); }"
          }
        },
        {
          "id": "matching",
          "title": "Pattern Matching",
          "content": {
            "description": "A <strong>match</strong> expression must be exhaustive.",
            "code": "match value {<br>    Some(v) =&gt; v,<br>    None =&gt; 0,<br>}"
          }
        }
      ]
    }
  ]
}"#
    .to_string()
}

pub fn sample_document() -> ContentDocument {
    serde_json::from_str(&sample_document_json()).unwrap()
}

/// Write `content.json` into a fresh temp directory and return it.
pub fn write_site(content_json: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("content.json"), content_json).unwrap();
    tmp
}

/// A topic with plain description and code.
pub fn topic(id: &str, title: &str, description: &str, code: &str) -> Topic {
    Topic {
        id: id.to_string(),
        title: Some(title.to_string()),
        icon: None,
        content: TopicContent {
            description: (!description.is_empty()).then(|| description.to_string()),
            code: (!code.is_empty()).then(|| code.to_string()),
        },
    }
}

/// A one-section document holding `topics`.
pub fn single_section(title: &str, topics: Vec<Topic>) -> ContentDocument {
    ContentDocument {
        sections: vec![Section {
            id: "section".to_string(),
            title: title.to_string(),
            topics,
        }],
    }
}

/// `count` topics titled `Item N`, each mentioning "needle" in its description.
pub fn numbered_topics(count: usize) -> Vec<Topic> {
    (1..=count)
        .map(|n| {
            topic(
                &format!("item-{n}"),
                &format!("Item {n}"),
                "contains the needle somewhere",
                "",
            )
        })
        .collect()
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a search record by id. Panics if not found.
pub fn find_record<'a>(index: &'a SearchIndex, id: &str) -> &'a SearchRecord {
    index
        .records()
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = index.records().iter().map(|r| r.id.as_str()).collect();
            panic!("record '{id}' not found. Available: {ids:?}")
        })
}
