//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! display-ready data only: truncated labels, selection flags, highlight
//! ranges and pre-formatted prices.
//!
//! # Example
//!
//! ```rust
//! use shopsearch::ui::viewmodel::{
//!     BodyView, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel,
//! };
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Product Search ".to_string(), status: None },
//!     error_banner: None,
//!     search_bar: SearchBarInfo { query: String::new(), is_focused: true },
//!     body: BodyView::Empty(EmptyState {
//!         message: "Start typing to search products".to_string(),
//!         subtitle: String::new(),
//!     }),
//!     footer: FooterInfo { keybindings: "Esc: close".to_string() },
//! };
//! assert!(vm.error_banner.is_none());
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Header information (title, load status).
    pub header: HeaderInfo,

    /// Failure message shown above the search bar.
    pub error_banner: Option<String>,

    /// The search input.
    pub search_bar: SearchBarInfo,

    /// Everything between the search bar and the footer.
    pub body: BodyView,

    /// Footer information (keybindings).
    pub footer: FooterInfo,
}

/// What the screen shows below the search bar.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    /// A load, refresh or search is outstanding.
    Loading(EmptyState),

    /// One or more titled lists: suggestions, or trending and categories.
    Lists(Vec<ListSection>),

    /// Products from the last search.
    Results {
        /// One-line description above the table, e.g. "3 of 40 products".
        summary: String,
        rows: Vec<ResultRow>,
    },

    /// Nothing loaded yet.
    Empty(EmptyState),
}

/// A titled list of selectable strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSection {
    pub title: String,
    pub items: Vec<DisplayItem>,
}

/// Display information for one suggestion, trending search or category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Text shown for the item.
    pub label: String,

    /// Whether this item is under the keyboard selection.
    pub is_selected: bool,

    /// Character ranges matching the query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// One product row of the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub name: String,
    pub category: String,
    pub price: String,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Right-aligned status, e.g. "updated 2m ago" or "refreshing…".
    pub status: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Centered message shown when there is no list to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,

    /// Whether the keyboard selection rests on the input.
    pub is_focused: bool,
}
