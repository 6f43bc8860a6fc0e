//! Active-heading tracking for the table of contents.
//!
//! Each observer batch is reduced to one decision: among the headings that
//! are intersecting, the one nearest the viewport top becomes active. A batch
//! where nothing intersects changes nothing, so the last active entry stays
//! highlighted while the reader is between headings.

use crate::viewport::IntersectionEntry;

#[derive(Debug, Clone, Default)]
pub struct Scrollspy {
    active: Option<String>,
}

impl Scrollspy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one callback batch. Returns the newly active id when the batch
    /// had any intersecting heading.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) -> Option<&str> {
        let topmost = entries
            .iter()
            .filter(|e| e.is_intersecting)
            .min_by(|a, b| a.top.total_cmp(&b.top))?;
        self.active = Some(topmost.target.clone());
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}
