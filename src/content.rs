//! Content loading and validation.
//!
//! Stage 1 of the build. Reads the content document from the source
//! directory (`content.json` unless `content_file` says otherwise) or, when
//! `content_url` is configured, fetches it over HTTP(S). Loading happens once
//! per build; there is no retry and no partial result.
//!
//! ## Failure Modes
//!
//! | Failure | Variant |
//! |---------|---------|
//! | File missing / unreadable | [`LoadError::Io`] |
//! | Connection, TLS, DNS | [`LoadError::Transport`] |
//! | Non-success HTTP status | [`LoadError::Status`] |
//! | Invalid JSON or wrong shape | [`LoadError::Parse`] |
//!
//! All of them surface the same way on the page: one inline error message in
//! the content area (see [`crate::render::render_error`]).
//!
//! ## Validation
//!
//! [`validate`] checks what the page relies on but the JSON shape cannot
//! express: ids are non-empty and unique across sections *and* topics, since
//! both become `#id` anchors on the same page.

use crate::config::SiteConfig;
use crate::types::ContentDocument;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("invalid content document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<ureq::Error> for LoadError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => LoadError::Status(code),
            other => LoadError::Transport(other.to_string()),
        }
    }
}

/// Where the content document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    File(PathBuf),
    Url(String),
}

impl ContentSource {
    /// Resolve the configured location relative to the source directory.
    pub fn from_config(source_dir: &Path, config: &SiteConfig) -> Self {
        match &config.content_url {
            Some(url) => ContentSource::Url(url.clone()),
            None => ContentSource::File(source_dir.join(&config.content_file)),
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::File(path) => write!(f, "{}", path.display()),
            ContentSource::Url(url) => f.write_str(url),
        }
    }
}

/// Load and parse the content document.
pub fn load(source: &ContentSource) -> Result<ContentDocument, LoadError> {
    let body = match source {
        ContentSource::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?,
        ContentSource::Url(url) => fetch(url)?,
    };
    tracing::debug!(%source, bytes = body.len(), "content document read");
    parse(&body)
}

/// Parse a content document from JSON text.
pub fn parse(json: &str) -> Result<ContentDocument, LoadError> {
    Ok(serde_json::from_str(json)?)
}

fn fetch(url: &str) -> Result<String, LoadError> {
    let mut response = ureq::get(url).call()?;
    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        return Err(LoadError::Status(status));
    }
    Ok(response.body_mut().read_to_string()?)
}

/// A problem found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    EmptyId { location: String },
    DuplicateId { id: String, first: String, second: String },
    UntitledTopic { section: String, id: String },
}

impl ContentIssue {
    /// Untitled topics still render; everything else breaks anchors.
    pub fn is_error(&self) -> bool {
        !matches!(self, ContentIssue::UntitledTopic { .. })
    }
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentIssue::EmptyId { location } => write!(f, "empty id at {location}"),
            ContentIssue::DuplicateId { id, first, second } => {
                write!(f, "duplicate id '{id}' used by {first} and {second}")
            }
            ContentIssue::UntitledTopic { section, id } => write!(
                f,
                "topic '{id}' in section '{section}' has no title (no nav entry or search record)"
            ),
        }
    }
}

/// Check the anchor id space and flag untitled topics.
pub fn validate(doc: &ContentDocument) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, String> = HashMap::new();

    for (s_idx, section) in doc.sections.iter().enumerate() {
        claim(
            &mut seen,
            &mut issues,
            &section.id,
            format!("section {} '{}'", s_idx + 1, section.title),
        );
        for (t_idx, topic) in section.topics.iter().enumerate() {
            let label = topic.title().unwrap_or("(untitled)");
            claim(
                &mut seen,
                &mut issues,
                &topic.id,
                format!("topic {}.{} '{}'", s_idx + 1, t_idx + 1, label),
            );
            if topic.title().is_none() {
                issues.push(ContentIssue::UntitledTopic {
                    section: section.title.clone(),
                    id: topic.id.clone(),
                });
            }
        }
    }
    issues
}

fn claim<'a>(
    seen: &mut HashMap<&'a str, String>,
    issues: &mut Vec<ContentIssue>,
    id: &'a str,
    location: String,
) {
    if id.trim().is_empty() {
        issues.push(ContentIssue::EmptyId { location });
    } else if let Some(first) = seen.get(id) {
        issues.push(ContentIssue::DuplicateId {
            id: id.to_string(),
            first: first.clone(),
            second: location,
        });
    } else {
        seen.insert(id, location);
    }
}
