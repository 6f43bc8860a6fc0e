//! CLI output formatting for all commands.
//!
//! # Information-First Display
//!
//! Output leads with the content's identity (positional index and title)
//! and shows anchors and field previews as indented context lines, so the
//! load output reads as an inventory of the page.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Source: site/content.json
//!
//! Sections
//! 001 Basics (2 topics)
//!     #basics
//!     001 Variables
//!         #variables
//!         Description: Bindings are immutable unless declared with mut.
//!         Code: 2 lines
//!     002 (untitled)
//!         #scratch
//! ```
//!
//! ## Generate
//!
//! ```text
//! index.html
//! search-index.json
//!
//! Generated 3 sections, 12 topics, 12 search records, 15 nav entries
//! ```
//!
//! ## Search
//!
//! ```text
//! 001 Arrays  Basics > Arrays
//!     #arrays
//!     An [Array] is a list
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::content::{ContentIssue, ContentSource};
use crate::generate::GenerateSummary;
use crate::markup::{inner_text, text_content};
use crate::search::{SearchOutcome, SnippetPart};
use crate::types::ContentDocument;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional topic count.
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!(
            "{} {} ({})",
            format_index(index),
            title,
            plural(n, "topic", "topics")
        ),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// `1 topic`, `2 topics`.
fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// Load output
// ============================================================================

/// Format the loaded document as a section/topic inventory.
pub fn format_load_output(doc: &ContentDocument, source: &ContentSource) -> Vec<String> {
    let mut lines = vec![format!("Source: {}", source), String::new()];
    lines.push("Sections".to_string());

    for (s_idx, section) in doc.sections.iter().enumerate() {
        lines.push(entity_header(
            s_idx + 1,
            &section.title,
            Some(section.topics.len()),
        ));
        lines.push(format!("{}#{}", indent(1), section.id));

        for (t_idx, topic) in section.topics.iter().enumerate() {
            let title = topic.title().unwrap_or("(untitled)");
            lines.push(format!("{}{}", indent(1), entity_header(t_idx + 1, title, None)));
            lines.push(format!("{}#{}", indent(2), topic.id));

            if let Some(desc) = &topic.content.description {
                let plain = text_content(desc);
                let truncated = truncate_desc(plain.trim(), 60);
                if !truncated.is_empty() {
                    lines.push(format!("{}Description: {}", indent(2), truncated));
                }
            }
            if let Some(code) = &topic.content.code {
                let line_count = inner_text(code).trim().lines().count();
                if line_count > 0 {
                    let count = plural(line_count, "line", "lines");
                    lines.push(format!("{}Code: {}", indent(2), count));
                }
            }
        }
    }
    lines
}

pub fn print_load_output(doc: &ContentDocument, source: &ContentSource) {
    for line in format_load_output(doc, source) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

pub fn format_check_output(issues: &[ContentIssue]) -> Vec<String> {
    if issues.is_empty() {
        return vec!["No issues found".to_string()];
    }
    let mut lines = vec!["Issues".to_string()];
    for issue in issues {
        let level = if issue.is_error() { "error" } else { "warning" };
        lines.push(format!("{}{}: {}", indent(1), level, issue));
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(errors, "error", "errors"),
        plural(issues.len() - errors, "warning", "warnings")
    ));
    lines
}

pub fn print_check_output(issues: &[ContentIssue]) {
    for line in format_check_output(issues) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary.files.clone();
    lines.push(String::new());
    match &summary.load_error {
        Some(reason) => lines.push(format!("Generated error page: {}", reason)),
        None => lines.push(format!(
            "Generated {}, {}, {}, {}",
            plural(summary.sections, "section", "sections"),
            plural(summary.topics, "topic", "topics"),
            plural(summary.records, "search record", "search records"),
            plural(summary.nav_entries, "nav entry", "nav entries"),
        )),
    }
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Search output
// ============================================================================

/// Format search hits; highlighted fragments are shown in `[brackets]`.
pub fn format_search_output(query: &str, outcome: &SearchOutcome) -> Vec<String> {
    let hits = outcome.hits();
    if hits.is_empty() {
        return vec![format!("No results for '{}'", query)];
    }
    let mut lines = Vec::new();
    for (i, hit) in hits.iter().enumerate() {
        lines.push(format!(
            "{}  {} > {}",
            entity_header(i + 1, &hit.title, None),
            hit.category,
            hit.title
        ));
        lines.push(format!("{}#{}", indent(1), hit.id));
        let snippet: String = hit
            .snippet
            .parts
            .iter()
            .map(|p| match p {
                SnippetPart::Text(t) => t.replace('\n', " "),
                SnippetPart::Mark(m) => format!("[{}]", m),
            })
            .collect();
        if !snippet.is_empty() {
            lines.push(format!("{}{}", indent(1), snippet));
        }
    }
    lines
}

pub fn print_search_output(query: &str, outcome: &SearchOutcome) {
    for line in format_search_output(query, outcome) {
        println!("{}", line);
    }
}
