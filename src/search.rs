//! In-page search: index building and query matching.
//!
//! ## Index
//!
//! [`SearchIndex::build`] emits one [`SearchRecord`] per *titled* topic block,
//! in document order. The index is written next to the page as
//! `search-index.json` and inlined into it for the page runtime.
//!
//! ## Matching
//!
//! [`SearchIndex::search`] is a linear scan: a record matches when its title,
//! description or code contains the query, case-insensitively. The first
//! `max_results` matches are returned in index order; there is no ranking.
//!
//! ## Snippets
//!
//! Each hit shows a short window of one field:
//!
//! 1. code, if the code contains the query;
//! 2. otherwise the description;
//! 3. but if the *title* contains the query, always the description.
//!
//! The window starts `context_before` characters before the first occurrence
//! and ends `context_after` characters past its end, clamped to the field.
//! `...` marks a clamped-away start or end. Every occurrence of the query
//! inside the window is wrapped in `<mark>`.

use crate::config::SearchConfig;
use crate::render::RenderedPage;
use maud::{Markup, html};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
    /// Owning section title.
    pub category: String,
    pub description: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

/// Result of running a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query or nothing matched: the results panel is hidden.
    Hidden,
    Results(Vec<SearchHit>),
}

impl SearchOutcome {
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Hidden => &[],
            SearchOutcome::Results(hits) => hits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub category: String,
    pub snippet: Snippet,
}

/// Which record field a snippet was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetSource {
    Description,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetPart {
    Text(String),
    Mark(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub source: SnippetSource,
    pub parts: Vec<SnippetPart>,
}

impl Snippet {
    /// Snippet text without highlight markers.
    pub fn plain(&self) -> String {
        self.parts
            .iter()
            .map(|p| match p {
                SnippetPart::Text(t) | SnippetPart::Mark(t) => t.as_str(),
            })
            .collect()
    }

    /// Highlighted fragments, in order.
    pub fn marks(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                SnippetPart::Mark(m) => Some(m.as_str()),
                SnippetPart::Text(_) => None,
            })
            .collect()
    }

    pub fn to_markup(&self) -> Markup {
        html! {
            @for part in &self.parts {
                @match part {
                    SnippetPart::Text(text) => { (text) }
                    SnippetPart::Mark(text) => { mark { (text) } }
                }
            }
        }
    }
}

impl SearchIndex {
    /// Index every titled topic of a rendered page. An error page yields an
    /// empty index.
    pub fn build(page: &RenderedPage) -> Self {
        let records = page
            .topics
            .iter()
            .filter_map(|topic| {
                let title = topic.title.as_ref()?;
                Some(SearchRecord {
                    id: topic.id.clone(),
                    title: title.clone(),
                    category: topic.category.clone(),
                    description: topic.description.clone(),
                    code: topic.code.clone(),
                })
            })
            .collect();
        Self { records }
    }

    /// Replace the index contents with a fresh build.
    pub fn rebuild(&mut self, page: &RenderedPage) {
        *self = Self::build(page);
    }

    pub fn from_records(records: Vec<SearchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn search(&self, query: &str, config: &SearchConfig) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::Hidden;
        }
        let needle = fold(query);

        let hits: Vec<SearchHit> = self
            .records
            .iter()
            .filter(|r| {
                contains_folded(&r.title, &needle)
                    || contains_folded(&r.description, &needle)
                    || contains_folded(&r.code, &needle)
            })
            .take(config.max_results)
            .map(|r| SearchHit {
                id: r.id.clone(),
                title: r.title.clone(),
                category: r.category.clone(),
                snippet: snippet_for(r, query, &needle, config),
            })
            .collect();

        if hits.is_empty() {
            SearchOutcome::Hidden
        } else {
            SearchOutcome::Results(hits)
        }
    }
}

fn snippet_for(
    record: &SearchRecord,
    query: &str,
    needle: &[char],
    config: &SearchConfig,
) -> Snippet {
    let mut source = SnippetSource::Description;
    if contains_folded(&record.code, needle) {
        source = SnippetSource::Code;
    }
    if contains_folded(&record.title, needle) {
        source = SnippetSource::Description;
    }
    let text = match source {
        SnippetSource::Description => &record.description,
        SnippetSource::Code => &record.code,
    };

    let window = snippet_window(text, needle, config);
    Snippet {
        source,
        parts: highlight(&window, query),
    }
}

/// Cut the display window around the first occurrence of `needle`.
///
/// When the field has no occurrence (a title-only match), the window is
/// measured from one character before the start of the field.
fn snippet_window(text: &str, needle: &[char], config: &SearchConfig) -> String {
    let chars: Vec<char> = text.chars().collect();
    let position = find_folded(&chars, needle)
        .map(|p| p as isize)
        .unwrap_or(-1);

    let start = (position - config.context_before as isize).max(0) as usize;
    let end = (position + (needle.len() + config.context_after) as isize)
        .clamp(0, chars.len() as isize) as usize;
    let start = start.min(end);

    let inner: String = chars[start..end].iter().collect();
    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(inner.trim());
    if end < chars.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Split `text` around every case-insensitive occurrence of the literal query.
fn highlight(text: &str, query: &str) -> Vec<SnippetPart> {
    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return vec![SnippetPart::Text(text.to_string())];
    };

    let mut parts = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            parts.push(SnippetPart::Text(text[last..m.start()].to_string()));
        }
        parts.push(SnippetPart::Mark(m.as_str().to_string()));
        last = m.end();
    }
    if last < text.len() {
        parts.push(SnippetPart::Text(text[last..].to_string()));
    }
    parts
}

/// Lowercase char-by-char, keeping one output char per input char so
/// positions line up with the original text.
fn fold(s: &str) -> Vec<char> {
    s.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn find_folded(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| {
        haystack[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(h, n)| fold_char(*h) == *n)
    })
}

fn contains_folded(text: &str, needle: &[char]) -> bool {
    let chars: Vec<char> = text.chars().collect();
    find_folded(&chars, needle).is_some()
}

/// Result list for the `#search-results` panel.
///
/// Each entry is an anchor to the record's heading with the title, a
/// `category > title` path and the highlighted snippet.
pub fn render_results(hits: &[SearchHit]) -> Markup {
    html! {
        @for hit in hits {
            a href={ "#" (hit.id) } {
                (hit.title) " "
                span.path { (hit.category) " > " (hit.title) }
                " "
                span.snippet { (hit.snippet.to_markup()) }
            }
        }
    }
}
