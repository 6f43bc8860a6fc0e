//! Slide-in navigation panel for narrow viewports.
//!
//! Three pieces of state move together: the panel's `active` class, the
//! backdrop's `active` class and the body's `menu-open` class. They are one
//! boolean here so they cannot drift apart.

use serde::Serialize;

/// Class state the menu implies on the panel, backdrop and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuState {
    pub panel_open: bool,
    pub backdrop_shown: bool,
    pub body_locked: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> MenuState {
        MenuState {
            panel_open: self.open,
            backdrop_shown: self.open,
            body_locked: self.open,
        }
    }

    /// Hamburger or backdrop click.
    pub fn toggle(&mut self) -> MenuState {
        self.open = !self.open;
        self.state()
    }

    /// A navigation entry was activated: close if open.
    ///
    /// Returns the new state only when something changed.
    pub fn close_for_navigation(&mut self) -> Option<MenuState> {
        self.open.then(|| self.toggle())
    }
}
