//! Keyboard focus and the derived screen mode.
//!
//! The screen has no explicit state machine: which body is shown is derived
//! from the state flags every time ([`Screen`]), with a fixed precedence of
//! loading, then suggestions, then results, then browsing.
//!
//! # Example
//!
//! ```rust
//! use shopsearch::app::{Focus, Screen};
//!
//! let focus = Focus::Item(0);
//! assert_ne!(focus, Focus::Input);
//! assert_ne!(Screen::Loading, Screen::Browse);
//! ```

/// Where keyboard selection currently rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The search input. Enter submits the typed query.
    #[default]
    Input,

    /// An item in the visible selectable list (suggestions, or trending
    /// followed by categories). Enter selects it.
    Item(usize),
}

/// Which body the screen renders below the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Initial load, refresh, or a search is in progress.
    Loading,
    /// Autocomplete suggestions for the typed query.
    Suggestions,
    /// Products returned by the last search.
    Results,
    /// Trending searches and categories.
    Browse,
    /// Nothing to show yet.
    Empty,
}
