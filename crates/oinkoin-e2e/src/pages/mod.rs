//! Screen objects.
//!
//! Each screen wraps a [`Resolver`] and exposes named reads and single
//! logical user actions. Screens borrow the driver mutably, so only one can
//! be live over a session at a time; moving to another screen hands the
//! borrow on (`open_*` methods return the next screen).
//!
//! ```ignore
//! let mut home = HomePage::new(Resolver::new(&mut driver));
//! home.show_records_per_year(2020)?;
//! assert_eq!(home.date_range_text()?, "Jan 1 - Dec 31, 2020");
//! ```

mod category_selection;
mod date_filter;
mod edit_record;
mod home;

pub use category_selection::CategorySelectionPage;
pub use date_filter::{DateFilterDialog, FilterMode};
pub use edit_record::EditRecordPage;
pub use home::HomePage;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::driver::Driver;
use crate::locator::{Resolver, Selector};
use crate::result::{ProbeError, ProbeResult};

/// Accessibility label of the app bar's back arrow
pub const BACK: &str = "Back";

/// Accessibility label of dialog confirmation buttons
pub const OK: &str = "OK";

/// Accessibility label of the destructive confirmation button
pub const YES: &str = "Yes";

/// A screen of the app under test.
pub trait Screen<D: Driver + ?Sized> {
    /// Element whose presence proves the screen is showing
    fn anchor(&self) -> Selector;

    /// Resolver over the session, reborrowed
    fn resolver(&mut self) -> Resolver<'_, D>;

    /// Whether the screen is currently displayed
    fn is_loaded(&mut self) -> bool {
        let anchor = self.anchor();
        self.resolver().exists(&anchor)
    }

    /// Screen name for logging
    fn screen_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Bottom navigation bar, present on every top-level screen
    fn navigation(&mut self) -> NavigationBar<'_, D> {
        NavigationBar::new(self.resolver())
    }
}

/// Bottom navigation destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Home,
    Categories,
    Settings,
}

impl Tab {
    /// Every tab, left to right
    pub const ALL: [Self; 3] = [Self::Home, Self::Categories, Self::Settings];

    /// Identifier of the tab when not selected
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "home-tab",
            Self::Categories => "categories-tab",
            Self::Settings => "settings-tab",
        }
    }

    /// Identifier of the tab when selected
    #[must_use]
    pub const fn selected_id(self) -> &'static str {
        match self {
            Self::Home => "home-tab-selected",
            Self::Categories => "categories-tab-selected",
            Self::Settings => "settings-tab-selected",
        }
    }

    /// Selector for the tab in the given state
    #[must_use]
    pub fn selector(self, selected: bool) -> Selector {
        Selector::id(if selected { self.selected_id() } else { self.id() })
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "Home",
            Self::Categories => "Categories",
            Self::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// Which of a tab's two renderings is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Selected,
    Unselected,
    /// Neither rendering is displayed (e.g. on a pushed screen)
    Absent,
}

/// The bottom navigation bar.
///
/// A tab is rendered under one of two identifiers depending on whether it
/// is selected; [`NavigationBar::tab_state`] is the single place that
/// resolves which one is showing.
#[derive(Debug)]
pub struct NavigationBar<'d, D: Driver + ?Sized> {
    resolver: Resolver<'d, D>,
}

impl<'d, D: Driver + ?Sized> NavigationBar<'d, D> {
    /// Wrap a resolver
    pub fn new(resolver: Resolver<'d, D>) -> Self {
        Self { resolver }
    }

    /// Current rendering of `tab`
    pub fn tab_state(&mut self, tab: Tab) -> TabState {
        if self.resolver.exists(&tab.selector(true)) {
            TabState::Selected
        } else if self.resolver.exists(&tab.selector(false)) {
            TabState::Unselected
        } else {
            TabState::Absent
        }
    }

    /// The selected tab, if the bar is showing
    pub fn selected_tab(&mut self) -> Option<Tab> {
        Tab::ALL
            .into_iter()
            .find(|tab| self.tab_state(*tab) == TabState::Selected)
    }

    /// Tap `tab` in whichever rendering is displayed
    pub fn open_tab(&mut self, tab: Tab) -> ProbeResult<()> {
        let state = self.tab_state(tab);
        debug!(%tab, ?state, "open tab");
        match state {
            TabState::Unselected => self.resolver.click(&tab.selector(false)),
            TabState::Selected => self.resolver.click(&tab.selector(true)),
            TabState::Absent => Err(ProbeError::ElementMissing {
                selector: tab.selector(false),
            }),
        }
    }

    pub fn open_home_tab(&mut self) -> ProbeResult<()> {
        self.open_tab(Tab::Home)
    }

    pub fn open_categories_tab(&mut self) -> ProbeResult<()> {
        self.open_tab(Tab::Categories)
    }

    pub fn open_settings_tab(&mut self) -> ProbeResult<()> {
        self.open_tab(Tab::Settings)
    }
}
