//! HTML site generation.
//!
//! Stage 3 of the build. Takes the rendered page and writes the final
//! static site.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html           # The reference page, index and runtime inlined
//! └── search-index.json    # The same search index, standalone
//! ```
//!
//! ## Page Shell
//!
//! The runtime script binds to these elements; renaming any of them breaks
//! the page:
//!
//! | Element                 | Role                                   |
//! |-------------------------|----------------------------------------|
//! | `#theme-toggle`         | light/dark switch                      |
//! | `#theme-icon-sun/moon`  | toggle icons, one visible at a time    |
//! | `.search-wrapper`       | outside-click boundary for results     |
//! | `#search-input`         | query field                            |
//! | `#search-results`       | results panel (`.visible` when shown)  |
//! | `#toc-nav`              | slide-in panel on narrow viewports     |
//! | `#toc-nav-container`    | table of contents entries              |
//! | `#hamburger-btn`        | menu toggle                            |
//! | `#mobile-menu-overlay`  | menu backdrop                          |
//! | `#main-content`         | rendered sections                      |
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Theme, search, navigation, observers and copy buttons
//!
//! The runtime reads two inline JSON blocks: `#search-index` (the
//! [`SearchIndex`]) and `#page-config` ([`RuntimeConfig`]).

use crate::config::{self, SiteConfig};
use crate::nav::{self, NavEntry};
use crate::render::{HeadingLevel, RenderedPage};
use crate::search::SearchIndex;
use crate::theme::ThemeApplication;
use crate::viewport::ObserverOptions;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a build wrote, for the CLI summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub files: Vec<String>,
    pub sections: usize,
    pub topics: usize,
    pub records: usize,
    pub nav_entries: usize,
    /// Set when the page is the load-failure message.
    pub load_error: Option<String>,
}

/// Settings the page runtime needs, serialized into `#page-config`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub storage_key: String,
    pub default_theme: String,
    pub header_offset: u32,
    pub max_results: usize,
    pub context_before: usize,
    pub context_after: usize,
    pub scrollspy: ObserverOptions,
    pub reveal: ObserverOptions,
    pub copy_label: String,
    pub copied_label: String,
    pub revert_ms: u64,
}

impl RuntimeConfig {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            storage_key: config.theme.storage_key.clone(),
            default_theme: config.theme.default.to_string(),
            header_offset: config.navigation.header_offset,
            max_results: config.search.max_results,
            context_before: config.search.context_before,
            context_after: config.search.context_after,
            scrollspy: ObserverOptions::scrollspy(&config.scrollspy),
            reveal: ObserverOptions::reveal(&config.reveal),
            copy_label: config.copy.label.clone(),
            copied_label: config.copy.copied_label.clone(),
            revert_ms: config.copy.revert_ms,
        }
    }
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

pub fn generate(
    page: &RenderedPage,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let index = SearchIndex::build(page);
    let toc = nav::build_toc(&page.headings);

    // Generate CSS with colors from config
    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let index_json = serde_json::to_string(&index)?;
    let runtime_json = serde_json::to_string(&RuntimeConfig::from_config(config))?;

    fs::create_dir_all(output_dir)?;

    let page_html = render_page(page, &toc, &index_json, &runtime_json, config, &css);
    fs::write(output_dir.join("index.html"), page_html.into_string())?;
    tracing::debug!("wrote index.html");

    fs::write(
        output_dir.join("search-index.json"),
        serde_json::to_string_pretty(&index)?,
    )?;
    tracing::debug!(records = index.len(), "wrote search-index.json");

    let sections = page
        .headings
        .iter()
        .filter(|h| h.level == HeadingLevel::Category)
        .count();

    Ok(GenerateSummary {
        files: vec!["index.html".to_string(), "search-index.json".to_string()],
        sections,
        topics: page.topics.len(),
        records: index.len(),
        nav_entries: toc.len(),
        load_error: page.error.clone(),
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, theme: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the fixed header: menu button, title, search and theme toggle
fn site_header(title: &str, icons: ThemeApplication) -> Markup {
    html! {
        header.site-header {
            button id="hamburger-btn" class="hamburger" type="button" aria-label="Toggle navigation" {
                span.hamburger-line {}
                span.hamburger-line {}
                span.hamburger-line {}
            }
            a.site-title href="#" { (title) }
            div.search-wrapper {
                input id="search-input" type="search" placeholder="Search..." autocomplete="off" aria-label="Search";
                div id="search-results" class="search-results" {}
            }
            button id="theme-toggle" class="theme-toggle" type="button" aria-label="Toggle theme" {
                svg id="theme-icon-sun" viewBox="0 0 24 24" width="20" height="20"
                    fill="none" stroke="currentColor" stroke-width="2"
                    style=[hidden_style(icons.sun_visible)] {
                    circle cx="12" cy="12" r="5" {}
                    path d="M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42" {}
                }
                svg id="theme-icon-moon" viewBox="0 0 24 24" width="20" height="20"
                    fill="none" stroke="currentColor" stroke-width="2"
                    style=[hidden_style(icons.moon_visible)] {
                    path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z" {}
                }
            }
        }
    }
}

fn hidden_style(visible: bool) -> Option<&'static str> {
    (!visible).then_some("display: none")
}

/// Inline JSON for a `<script type="application/json">` block.
///
/// `<`, `>` and `&` only occur inside JSON strings, so they are written as
/// `\u` escapes. The script body then holds no markup the HTML tokenizer
/// could act on (`</script>`, `<!--`, `<script`).
fn inline_json(json: &str) -> PreEscaped<String> {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    PreEscaped(out)
}

fn render_page(
    page: &RenderedPage,
    toc: &[NavEntry],
    index_json: &str,
    runtime_json: &str,
    config: &SiteConfig,
    css: &str,
) -> Markup {
    let icons = ThemeApplication::for_theme(config.theme.default);
    let content = html! {
        (site_header(&config.site.title, icons))
        div id="mobile-menu-overlay" class="mobile-menu-overlay" {}
        div.layout {
            nav id="toc-nav" class="toc-nav" {
                div id="toc-nav-container" {
                    (nav::render_toc(toc))
                }
            }
            main id="main-content" {
                (page.body)
            }
        }
        script id="search-index" type="application/json" { (inline_json(index_json)) }
        script id="page-config" type="application/json" { (inline_json(runtime_json)) }
        script { (PreEscaped(JS)) }
    };

    base_document(
        &config.site.title,
        config.theme.default.as_str(),
        css,
        content,
    )
}
