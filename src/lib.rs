//! # Simple Docs
//!
//! A static generator for single-page reference sites: cheatsheets and
//! quick-reference pages made of titled sections and topic cards. One JSON
//! content document becomes one self-contained `index.html` with in-page
//! search, a scrollspy table of contents, a light/dark theme and
//! copy-to-clipboard code blocks.
//!
//! # Architecture: Load, Render, Generate
//!
//! ```text
//! 1. Load      content.json / content_url  →  ContentDocument
//! 2. Render    ContentDocument             →  RenderedPage (markup + headings + topics)
//! 3. Generate  RenderedPage                →  dist/index.html, dist/search-index.json
//! ```
//!
//! Rendering records typed [`render::Heading`] and [`render::RenderedTopic`]
//! values as it writes markup, so the search index and the table of contents
//! are derived from data rather than scraped back out of the HTML.
//!
//! The interactive behaviour of the page is modelled by
//! [`page::PageController`]: every UI event goes in, the DOM effects it
//! implies come out. The shipped `static/site.js` runtime performs the same
//! dispatch in the browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Content document model: sections, topics, topic content |
//! | [`content`] | Loading from file or URL, parsing, and content validation |
//! | [`render`] | Content area markup plus heading and topic records |
//! | [`markup`] | Text extraction from trusted inline markup |
//! | [`search`] | Search index, query matching, snippets and highlighting |
//! | [`nav`] | Table of contents and header-offset scroll arithmetic |
//! | [`viewport`] | Intersection entries and observer options |
//! | [`scrollspy`] | Active-heading tracking |
//! | [`reveal`] | One-shot topic block reveal |
//! | [`menu`] | Mobile slide-in menu state |
//! | [`theme`] | Light/dark theme with persisted preference |
//! | [`page`] | Page controller: event dispatch over all components |
//! | [`generate`] | Final HTML page and search index output using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Trusted Markup
//!
//! Topic `icon`, `description` and `code` fields are inserted verbatim. The
//! content document is authored alongside the site, not user-submitted.
//! Titles and everything the generator writes itself go through Maud's
//! escaping.
//!
//! ## One Id Space
//!
//! Section and topic ids share the page's anchor namespace, since navigation
//! and search results both link by `#id`. `simple-docs check` reports
//! duplicates; `build` logs a warning and carries on.
//!
//! ## No Ranking
//!
//! Search is a linear case-insensitive substring scan in document order,
//! capped at `max_results`. Reference pages are small enough that the
//! author's ordering is the best ranking available.

pub mod config;
pub mod content;
pub mod generate;
pub mod markup;
pub mod menu;
pub mod nav;
pub mod output;
pub mod page;
pub mod render;
pub mod reveal;
pub mod scrollspy;
pub mod search;
pub mod theme;
pub mod types;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_helpers;
