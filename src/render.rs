//! Content rendering.
//!
//! Stage 2 of the build. Turns a [`ContentDocument`] into the markup mounted
//! in `#main-content`, and records while doing so everything the later stages
//! would otherwise have to scrape back out of the DOM:
//!
//! - [`Heading`]s in document order (navigation, scrollspy)
//! - [`RenderedTopic`]s with plain-text fields (search index, reveal, copy)
//!
//! ## Markup Shape
//!
//! ```html
//! <section>
//!   <h2 id="basics">Basics</h2>
//!   <div class="topic-block" data-topic="variables">
//!     <h3 id="variables"><svg>…</svg><span>Variables</span></h3>
//!     <p>Bindings are …</p>
//!     <div class="code-block">
//!       <button class="copy-btn" type="button">Copy</button>
//!       <pre>let x = 5;</pre>
//!     </div>
//!   </div>
//! </section>
//! ```
//!
//! The `icon`, `description` and `code` fields are inserted verbatim
//! (`PreEscaped`); titles go through maud's escaping.

use crate::content::LoadError;
use crate::markup::{inner_text, text_content};
use crate::types::{ContentDocument, Section, Topic};
use maud::{Markup, PreEscaped, html};
use serde::Serialize;

/// Which heading element a [`Heading`] was rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// Section title (`h2`).
    Category,
    /// Topic title (`h3`).
    Topic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub id: String,
    /// Text content of the heading, trimmed.
    pub text: String,
}

/// One rendered `.topic-block` and its plain-text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTopic {
    pub id: String,
    /// Owning section's heading text.
    pub category: String,
    /// Sub-heading text, `None` for untitled topics.
    pub title: Option<String>,
    pub description: String,
    pub code: String,
}

/// The content area of the page plus the records derived from it.
#[derive(Debug)]
pub struct RenderedPage {
    pub body: Markup,
    pub headings: Vec<Heading>,
    pub topics: Vec<RenderedTopic>,
    /// Set when loading failed and `body` is the error message.
    pub error: Option<String>,
}

impl RenderedPage {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Render every section and topic in document order.
pub fn render_content(doc: &ContentDocument, copy_label: &str) -> RenderedPage {
    let mut headings = Vec::new();
    let mut topics = Vec::new();

    let body = html! {
        @for section in &doc.sections {
            (render_section(section, copy_label, &mut headings, &mut topics))
        }
    };

    RenderedPage {
        body,
        headings,
        topics,
        error: None,
    }
}

/// The single inline message shown when the content document can't be loaded.
pub fn render_error(err: &LoadError) -> RenderedPage {
    let reason = err.to_string();
    RenderedPage {
        body: html! {
            p.load-error role="alert" { "Failed to load page content: " (reason) }
        },
        headings: Vec::new(),
        topics: Vec::new(),
        error: Some(reason),
    }
}

fn render_section(
    section: &Section,
    copy_label: &str,
    headings: &mut Vec<Heading>,
    topics: &mut Vec<RenderedTopic>,
) -> Markup {
    let category = section.title.trim().to_string();
    headings.push(Heading {
        level: HeadingLevel::Category,
        id: section.id.clone(),
        text: category.clone(),
    });

    html! {
        section {
            h2 id=(section.id) { (section.title) }
            @for topic in &section.topics {
                (render_topic(topic, &category, copy_label, headings, topics))
            }
        }
    }
}

fn render_topic(
    topic: &Topic,
    category: &str,
    copy_label: &str,
    headings: &mut Vec<Heading>,
    topics: &mut Vec<RenderedTopic>,
) -> Markup {
    let title = topic.title().map(|title| {
        let icon_text = topic.icon.as_deref().map(text_content).unwrap_or_default();
        format!("{icon_text}{title}").trim().to_string()
    });
    if let Some(text) = &title {
        headings.push(Heading {
            level: HeadingLevel::Topic,
            id: topic.id.clone(),
            text: text.clone(),
        });
    }

    let description = topic.content.description.as_deref().filter(|d| !d.is_empty());
    let code = topic.content.code.as_deref().filter(|c| !c.is_empty());

    topics.push(RenderedTopic {
        id: topic.id.clone(),
        category: category.to_string(),
        title,
        description: description
            .map(|d| text_content(d).trim().to_string())
            .unwrap_or_default(),
        code: code
            .map(|c| inner_text(c).trim().to_string())
            .unwrap_or_default(),
    });

    html! {
        div.topic-block data-topic=(topic.id) {
            @if let Some(title) = topic.title() {
                h3 id=(topic.id) {
                    @if let Some(icon) = &topic.icon {
                        (PreEscaped(icon))
                    }
                    span { (title) }
                }
            }
            @if let Some(description) = description {
                p { (PreEscaped(description)) }
            }
            @if let Some(code) = code {
                div.code-block {
                    button.copy-btn type="button" { (copy_label) }
                    pre { (PreEscaped(code)) }
                }
            }
        }
    }
}
