//! One-shot reveal of topic blocks as they scroll into view.

use crate::viewport::IntersectionEntry;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct RevealAnimator {
    observed: HashSet<String>,
    visible: HashSet<String>,
}

impl RevealAnimator {
    /// Start observing the given topic blocks.
    pub fn new<I, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            observed: blocks.into_iter().map(Into::into).collect(),
            visible: HashSet::new(),
        }
    }

    /// Process one callback batch. Returns the blocks revealed by it, in
    /// batch order; each is no longer observed afterwards.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) -> Vec<String> {
        let mut revealed = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if self.observed.remove(&entry.target) {
                self.visible.insert(entry.target.clone());
                revealed.push(entry.target.clone());
            }
        }
        revealed
    }

    pub fn is_visible(&self, block: &str) -> bool {
        self.visible.contains(block)
    }

    pub fn is_observed(&self, block: &str) -> bool {
        self.observed.contains(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersecting_block_becomes_visible_and_unobserved() {
        let mut reveal = RevealAnimator::new(["a", "b"]);
        let revealed = reveal.observe(&[
            IntersectionEntry::new("a", true, 400.0),
            IntersectionEntry::new("b", false, 900.0),
        ]);
        assert_eq!(revealed, ["a"]);
        assert!(reveal.is_visible("a"));
        assert!(!reveal.is_observed("a"));
        assert!(reveal.is_observed("b"));
    }

    #[test]
    fn visible_marker_never_reverts() {
        let mut reveal = RevealAnimator::new(["a"]);
        reveal.observe(&[IntersectionEntry::new("a", true, 400.0)]);
        for _ in 0..3 {
            assert!(reveal.observe(&[IntersectionEntry::new("a", false, -200.0)]).is_empty());
            assert!(reveal.observe(&[IntersectionEntry::new("a", true, 300.0)]).is_empty());
        }
        assert!(reveal.is_visible("a"));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut reveal = RevealAnimator::new(["a"]);
        assert!(reveal.observe(&[IntersectionEntry::new("zzz", true, 0.0)]).is_empty());
        assert!(!reveal.is_visible("zzz"));
    }
}
