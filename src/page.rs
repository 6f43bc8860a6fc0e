//! The page controller: all interactive state of one loaded page.
//!
//! A [`PageController`] is built once per page load from the rendered
//! content. It owns the search index, the heading list and every component's
//! state, and reacts to UI [`Event`]s by returning the DOM [`Effect`]s the
//! host must perform. [`PageController::handle`] is the whole dispatch table.
//!
//! ```text
//! load:    theme ─────────────────────────────────────────▶ ApplyTheme
//!          content ─▶ index ─▶ toc ─▶ scrollspy + reveal
//!
//! events:  SearchInput / SearchFocus ─▶ ShowResults | HideResults
//!          ResultActivated ───────────▶ SetMenu? ScrollTo HideResults ClearSearchInput
//!          NavActivated ──────────────▶ SetMenu? ScrollTo
//!          HeadingsIntersected ───────▶ SetActiveNav
//!          TopicsIntersected ─────────▶ RevealBlock*
//!          Hamburger / Backdrop ──────▶ SetMenu
//!          ThemeToggle ───────────────▶ ApplyTheme
//!          CopyClicked ───────────────▶ WriteClipboard
//!          ClipboardWritten ──────────▶ SetCopyLabel ScheduleCopyReset
//!          CopyTimerElapsed ──────────▶ SetCopyLabel
//! ```
//!
//! Everything runs on one event loop, so the controller is plain `&mut self`.

use crate::config::{CopyConfig, SearchConfig, SiteConfig};
use crate::menu::{MenuState, MobileMenu};
use crate::nav::{NavEntry, build_toc, scroll_target};
use crate::render::{Heading, RenderedPage};
use crate::reveal::RevealAnimator;
use crate::scrollspy::Scrollspy;
use crate::search::{SearchHit, SearchIndex, SearchOutcome};
use crate::theme::{Preferences, ThemeApplication, ThemeStore};
use crate::viewport::IntersectionEntry;
use std::collections::HashMap;

/// Where the target element currently is, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    /// Viewport-relative top of the target; `None` if it is not in the page.
    pub element_top: Option<f64>,
    pub page_y_offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SearchInput(String),
    SearchFocus,
    /// A click anywhere in the document.
    DocumentClick { inside_search: bool },
    ResultActivated { id: String, geometry: ScrollGeometry },
    NavActivated { id: String, geometry: ScrollGeometry },
    HeadingsIntersected(Vec<IntersectionEntry>),
    TopicsIntersected(Vec<IntersectionEntry>),
    HamburgerClicked,
    BackdropClicked,
    ThemeToggleClicked,
    CopyClicked { topic: String },
    /// The clipboard write started by a [`Effect::WriteClipboard`] succeeded.
    ClipboardWritten { topic: String },
    CopyTimerElapsed { topic: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ApplyTheme(ThemeApplication),
    ShowResults(Vec<SearchHit>),
    HideResults,
    ClearSearchInput,
    /// Smooth-scroll the document to `top`.
    ScrollTo { top: f64 },
    /// Mark this heading's entry active and clear all others.
    SetActiveNav(String),
    /// Add `is-visible` to the block and stop observing it.
    RevealBlock(String),
    SetMenu(MenuState),
    WriteClipboard { topic: String, text: String },
    SetCopyLabel { topic: String, label: String },
    ScheduleCopyReset { topic: String, after_ms: u64 },
}

pub struct PageController<P> {
    index: SearchIndex,
    headings: Vec<Heading>,
    toc: Vec<NavEntry>,
    code_blocks: HashMap<String, String>,
    theme: ThemeStore<P>,
    menu: MobileMenu,
    scrollspy: Scrollspy,
    reveal: RevealAnimator,
    query: String,
    results_visible: bool,
    search_config: SearchConfig,
    copy_config: CopyConfig,
    header_offset: u32,
}

impl<P: Preferences> PageController<P> {
    /// Wire up a freshly rendered page: index, navigation, observers.
    pub fn new(page: &RenderedPage, config: &SiteConfig, prefs: P) -> Self {
        let index = SearchIndex::build(page);
        let toc = build_toc(&page.headings);
        let code_blocks = page
            .topics
            .iter()
            .filter(|t| !t.code.is_empty())
            .map(|t| (t.id.clone(), t.code.clone()))
            .collect();
        let reveal = RevealAnimator::new(page.topics.iter().map(|t| t.id.clone()));

        Self {
            index,
            headings: page.headings.clone(),
            toc,
            code_blocks,
            theme: ThemeStore::new(prefs, &config.theme.storage_key, config.theme.default),
            menu: MobileMenu::default(),
            scrollspy: Scrollspy::new(),
            reveal,
            query: String::new(),
            results_visible: false,
            search_config: config.search.clone(),
            copy_config: config.copy.clone(),
            header_offset: config.navigation.header_offset,
        }
    }

    /// Apply the stored theme preference.
    pub fn start(&mut self) -> Vec<Effect> {
        let theme = self.theme.load();
        vec![Effect::ApplyTheme(self.theme.apply(theme))]
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SearchInput(value) => {
                self.query = value;
                self.run_search()
            }
            Event::SearchFocus => self.run_search(),
            Event::DocumentClick { inside_search } => {
                if inside_search {
                    Vec::new()
                } else {
                    self.results_visible = false;
                    vec![Effect::HideResults]
                }
            }
            Event::ResultActivated { id, geometry } => {
                let mut effects = self.navigate(&id, geometry);
                self.results_visible = false;
                self.query.clear();
                effects.push(Effect::HideResults);
                effects.push(Effect::ClearSearchInput);
                effects
            }
            Event::NavActivated { id, geometry } => self.navigate(&id, geometry),
            Event::HeadingsIntersected(entries) => self
                .scrollspy
                .observe(&entries)
                .map(|id| vec![Effect::SetActiveNav(id.to_string())])
                .unwrap_or_default(),
            Event::TopicsIntersected(entries) => self
                .reveal
                .observe(&entries)
                .into_iter()
                .map(Effect::RevealBlock)
                .collect(),
            Event::HamburgerClicked | Event::BackdropClicked => {
                vec![Effect::SetMenu(self.menu.toggle())]
            }
            Event::ThemeToggleClicked => vec![Effect::ApplyTheme(self.theme.toggle())],
            Event::CopyClicked { topic } => match self.code_blocks.get(&topic) {
                Some(text) => vec![Effect::WriteClipboard {
                    text: text.clone(),
                    topic,
                }],
                None => Vec::new(),
            },
            Event::ClipboardWritten { topic } => vec![
                Effect::SetCopyLabel {
                    topic: topic.clone(),
                    label: self.copy_config.copied_label.clone(),
                },
                Effect::ScheduleCopyReset {
                    topic,
                    after_ms: self.copy_config.revert_ms,
                },
            ],
            Event::CopyTimerElapsed { topic } => vec![Effect::SetCopyLabel {
                topic,
                label: self.copy_config.label.clone(),
            }],
        }
    }

    fn run_search(&mut self) -> Vec<Effect> {
        match self.index.search(&self.query, &self.search_config) {
            SearchOutcome::Hidden => {
                self.results_visible = false;
                vec![Effect::HideResults]
            }
            SearchOutcome::Results(hits) => {
                self.results_visible = true;
                vec![Effect::ShowResults(hits)]
            }
        }
    }

    /// Close the menu if open, then scroll the target under the header.
    fn navigate(&mut self, id: &str, geometry: ScrollGeometry) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(state) = self.menu.close_for_navigation() {
            effects.push(Effect::SetMenu(state));
        }
        let known = self.headings.iter().any(|h| h.id == id);
        if let (true, Some(top)) = (known, geometry.element_top) {
            effects.push(Effect::ScrollTo {
                top: scroll_target(top, geometry.page_y_offset, self.header_offset),
            });
        }
        effects
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn toc(&self) -> &[NavEntry] {
        &self.toc
    }

    pub fn active_heading(&self) -> Option<&str> {
        self.scrollspy.active()
    }

    pub fn is_revealed(&self, topic: &str) -> bool {
        self.reveal.is_visible(topic)
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn theme(&self) -> &ThemeStore<P> {
        &self.theme
    }

    pub fn into_preferences(self) -> P {
        self.theme.into_preferences()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_content;
    use crate::test_helpers::*;
    use crate::theme::{MemoryPreferences, Theme};

    fn controller() -> PageController<MemoryPreferences> {
        let page = render_content(&sample_document(), "Copy");
        let mut c = PageController::new(&page, &SiteConfig::default(), MemoryPreferences::default());
        c.start();
        c
    }

    fn at(top: f64, page_y: f64) -> ScrollGeometry {
        ScrollGeometry {
            element_top: Some(top),
            page_y_offset: page_y,
        }
    }

    #[test]
    fn start_applies_dark_by_default() {
        let page = render_content(&sample_document(), "Copy");
        let mut c = PageController::new(&page, &SiteConfig::default(), MemoryPreferences::default());
        let effects = c.start();
        assert_eq!(
            effects,
            [Effect::ApplyTheme(ThemeApplication::for_theme(Theme::Dark))]
        );
    }

    #[test]
    fn theme_survives_reload() {
        let mut c = controller();
        c.handle(Event::ThemeToggleClicked);
        assert_eq!(c.theme().current(), Theme::Light);

        let page = render_content(&sample_document(), "Copy");
        let mut reloaded = PageController::new(&page, &SiteConfig::default(), c.into_preferences());
        let effects = reloaded.start();
        assert_eq!(
            effects,
            [Effect::ApplyTheme(ThemeApplication::for_theme(Theme::Light))]
        );
    }

    #[test]
    fn wiring_builds_index_and_toc() {
        let c = controller();
        assert_eq!(c.index().len(), 4);
        assert_eq!(c.toc().len(), 6);
    }

    #[test]
    fn typing_shows_and_blank_hides() {
        let mut c = controller();
        let effects = c.handle(Event::SearchInput("array".into()));
        assert!(matches!(&effects[..], [Effect::ShowResults(hits)] if hits.len() == 1));
        assert!(c.results_visible());

        assert_eq!(c.handle(Event::SearchInput("   ".into())), [Effect::HideResults]);
        assert!(!c.results_visible());
    }

    #[test]
    fn focus_reruns_current_query() {
        let mut c = controller();
        c.handle(Event::SearchInput("loop".into()));
        c.handle(Event::DocumentClick { inside_search: false });
        assert!(!c.results_visible());
        let effects = c.handle(Event::SearchFocus);
        assert!(matches!(&effects[..], [Effect::ShowResults(_)]));
    }

    #[test]
    fn clicks_inside_search_keep_results() {
        let mut c = controller();
        c.handle(Event::SearchInput("loop".into()));
        assert!(c.handle(Event::DocumentClick { inside_search: true }).is_empty());
        assert!(c.results_visible());
    }

    #[test]
    fn result_activation_scrolls_and_clears() {
        let mut c = controller();
        c.handle(Event::SearchInput("match".into()));
        let effects = c.handle(Event::ResultActivated {
            id: "matching".into(),
            geometry: at(520.0, 100.0),
        });
        assert_eq!(
            effects,
            [
                Effect::ScrollTo { top: 550.0 },
                Effect::HideResults,
                Effect::ClearSearchInput
            ]
        );
        assert_eq!(c.query(), "");
        assert!(!c.results_visible());
    }

    #[test]
    fn nav_activation_closes_open_menu_then_scrolls() {
        let mut c = controller();
        c.handle(Event::HamburgerClicked);
        assert!(c.menu_open());
        let effects = c.handle(Event::NavActivated {
            id: "loops".into(),
            geometry: at(300.0, 0.0),
        });
        assert!(matches!(effects[0], Effect::SetMenu(MenuState { panel_open: false, .. })));
        assert_eq!(effects[1], Effect::ScrollTo { top: 230.0 });
        assert!(!c.menu_open());
    }

    #[test]
    fn result_activation_also_closes_menu() {
        let mut c = controller();
        c.handle(Event::HamburgerClicked);
        let effects = c.handle(Event::ResultActivated {
            id: "arrays".into(),
            geometry: at(90.0, 0.0),
        });
        assert!(matches!(effects[0], Effect::SetMenu(_)));
        assert!(!c.menu_open());
    }

    #[test]
    fn missing_target_does_not_scroll() {
        let mut c = controller();
        let effects = c.handle(Event::NavActivated {
            id: "nowhere".into(),
            geometry: at(10.0, 0.0),
        });
        assert!(effects.is_empty());
        let effects = c.handle(Event::NavActivated {
            id: "loops".into(),
            geometry: ScrollGeometry {
                element_top: None,
                page_y_offset: 0.0,
            },
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn backdrop_toggles_menu() {
        let mut c = controller();
        c.handle(Event::HamburgerClicked);
        let effects = c.handle(Event::BackdropClicked);
        assert_eq!(
            effects,
            [Effect::SetMenu(MenuState {
                panel_open: false,
                backdrop_shown: false,
                body_locked: false
            })]
        );
    }

    #[test]
    fn scrollspy_picks_topmost_and_keeps_last() {
        let mut c = controller();
        let effects = c.handle(Event::HeadingsIntersected(vec![
            IntersectionEntry::new("arrays", true, 120.0),
            IntersectionEntry::new("variables", true, 50.0),
        ]));
        assert_eq!(effects, [Effect::SetActiveNav("variables".into())]);

        let effects = c.handle(Event::HeadingsIntersected(vec![IntersectionEntry::new(
            "variables",
            false,
            -30.0,
        )]));
        assert!(effects.is_empty());
        assert_eq!(c.active_heading(), Some("variables"));
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut c = controller();
        let effects = c.handle(Event::TopicsIntersected(vec![IntersectionEntry::new(
            "loops", true, 600.0,
        )]));
        assert_eq!(effects, [Effect::RevealBlock("loops".into())]);
        let effects = c.handle(Event::TopicsIntersected(vec![
            IntersectionEntry::new("loops", false, 2000.0),
            IntersectionEntry::new("loops", true, 600.0),
        ]));
        assert!(effects.is_empty());
        assert!(c.is_revealed("loops"));
    }

    #[test]
    fn copy_flow_labels_and_reverts() {
        let mut c = controller();
        let effects = c.handle(Event::CopyClicked {
            topic: "variables".into(),
        });
        assert_eq!(
            effects,
            [Effect::WriteClipboard {
                topic: "variables".into(),
                text: "let x = 5;\nlet mut y = 6;".into()
            }]
        );

        let effects = c.handle(Event::ClipboardWritten {
            topic: "variables".into(),
        });
        assert_eq!(
            effects,
            [
                Effect::SetCopyLabel {
                    topic: "variables".into(),
                    label: "Copied!".into()
                },
                Effect::ScheduleCopyReset {
                    topic: "variables".into(),
                    after_ms: 2000
                }
            ]
        );

        let effects = c.handle(Event::CopyTimerElapsed {
            topic: "variables".into(),
        });
        assert_eq!(
            effects,
            [Effect::SetCopyLabel {
                topic: "variables".into(),
                label: "Copy".into()
            }]
        );
    }

    #[test]
    fn copy_on_block_without_code_is_noop() {
        let mut c = controller();
        assert!(c.handle(Event::CopyClicked { topic: "arrays".into() }).is_empty());
    }
}
