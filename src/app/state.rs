//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the screen knows: the query,
//! suggestions, browse lists, results, the loading/refreshing/error flags and
//! the bookkeeping that lets late API responses be recognised as stale. It is
//! mutated only by [`handle_event`](crate::app::handle_event).
//!
//! # Example
//!
//! ```rust
//! use shopsearch::app::{AppState, Screen};
//! use shopsearch::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! assert_eq!(state.screen(), Screen::Empty);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.error_banner.is_none());
//! ```

use super::debounce::Debouncer;
use super::modes::{Focus, Screen};
use crate::api::RequestId;
use crate::domain::{time_ago, SearchResults};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListSection, ResultRow,
    SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::ops::Range;
use std::time::Duration;

/// Default cap on the number of suggestions shown.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Rows taken by everything except the body: blank line, header, border,
/// error banner, search box (3), border, footer, and the unused last row.
const CHROME_ROWS: usize = 10;

/// Width reserved for the price column in the results table.
const PRICE_COLUMN_WIDTH: usize = 12;

/// The pair of parallel requests issued by one load or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBatch {
    pub categories: RequestId,
    pub trending: RequestId,
    pub categories_settled: bool,
    pub trending_settled: bool,
    pub failed: bool,
}

impl LoadBatch {
    #[must_use]
    pub const fn new(categories: RequestId, trending: RequestId) -> Self {
        Self {
            categories,
            trending,
            categories_settled: false,
            trending_settled: false,
            failed: false,
        }
    }

    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.categories_settled && self.trending_settled
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Text in the search input.
    pub query: String,

    /// Latest successfully fetched suggestions for the query.
    pub suggestions: Vec<String>,

    /// Whether the suggestion list is shown. Only true while both the list
    /// and the query are non-empty.
    pub suggestions_visible: bool,

    /// True while an initial load, refresh or search is outstanding.
    pub loading: bool,

    /// User-visible failure message, shown above the search bar.
    pub error: Option<String>,

    /// True while a refresh is outstanding.
    pub refreshing: bool,

    /// Browsable categories.
    pub categories: Vec<String>,

    /// Globally trending searches.
    pub trending: Vec<String>,

    /// Products returned by the last successful search.
    pub results: Option<SearchResults>,

    /// Unix timestamp of the last load that fetched both lists.
    pub last_loaded: Option<i64>,

    /// Keyboard selection.
    pub focus: Focus,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Maximum number of suggestions displayed and selectable.
    pub max_suggestions: usize,

    /// False once web access was denied; no request can reach the API then.
    pub api_available: bool,

    pub(crate) debouncer: Debouncer,
    pub(crate) next_request_id: RequestId,
    pub(crate) latest_suggestion: Option<RequestId>,
    pub(crate) load_batch: Option<LoadBatch>,
    pub(crate) latest_search: Option<RequestId>,
}

impl AppState {
    /// Creates an empty screen with the default debounce and suggestion cap.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_settings(theme, Debouncer::default().delay(), DEFAULT_MAX_SUGGESTIONS)
    }

    /// Creates an empty screen with explicit debounce delay and suggestion cap.
    #[must_use]
    pub fn with_settings(theme: Theme, debounce: Duration, max_suggestions: usize) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            suggestions_visible: false,
            loading: false,
            error: None,
            refreshing: false,
            categories: Vec::new(),
            trending: Vec::new(),
            results: None,
            last_loaded: None,
            focus: Focus::Input,
            theme,
            max_suggestions: max_suggestions.max(1),
            api_available: true,
            debouncer: Debouncer::new(debounce),
            next_request_id: RequestId(1),
            latest_suggestion: None,
            load_batch: None,
            latest_search: None,
        }
    }

    /// Hands out the next request id.
    pub(crate) fn issue_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id = id.next();
        id
    }

    /// Recomputes `loading` from the outstanding load batch and search.
    pub(crate) fn sync_loading(&mut self) {
        self.loading = self.load_batch.is_some() || self.latest_search.is_some();
        if self.load_batch.is_none() {
            self.refreshing = false;
        }
    }

    /// Which body is rendered below the search bar.
    #[must_use]
    pub fn screen(&self) -> Screen {
        if self.loading {
            Screen::Loading
        } else if self.suggestions_visible {
            Screen::Suggestions
        } else if self.results.is_some() {
            Screen::Results
        } else if !self.trending.is_empty() || !self.categories.is_empty() {
            Screen::Browse
        } else {
            Screen::Empty
        }
    }

    fn visible_suggestions(&self) -> &[String] {
        let end = self.suggestions.len().min(self.max_suggestions);
        &self.suggestions[..end]
    }

    /// Items the keyboard selection moves over, in display order.
    #[must_use]
    pub fn selectable_items(&self) -> Vec<&str> {
        match self.screen() {
            Screen::Suggestions => self.visible_suggestions().iter().map(String::as_str).collect(),
            Screen::Browse => self
                .trending
                .iter()
                .chain(self.categories.iter())
                .map(String::as_str)
                .collect(),
            Screen::Loading | Screen::Results | Screen::Empty => Vec::new(),
        }
    }

    /// The item under the keyboard selection, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<String> {
        match self.focus {
            Focus::Input => None,
            Focus::Item(index) => self.selectable_items().get(index).map(|s| (*s).to_string()),
        }
    }

    /// Moves the selection down, passing through the input after the last item.
    pub fn move_selection_down(&mut self) {
        let count = self.selectable_items().len();
        if count == 0 {
            self.focus = Focus::Input;
            return;
        }
        self.focus = match self.focus {
            Focus::Input => Focus::Item(0),
            Focus::Item(index) if index + 1 >= count => Focus::Input,
            Focus::Item(index) => Focus::Item(index + 1),
        };
    }

    /// Moves the selection up, passing through the input before the first item.
    pub fn move_selection_up(&mut self) {
        let count = self.selectable_items().len();
        if count == 0 {
            self.focus = Focus::Input;
            return;
        }
        self.focus = match self.focus {
            Focus::Input => Focus::Item(count - 1),
            Focus::Item(0) => Focus::Input,
            Focus::Item(index) => Focus::Item(index.min(count) - 1),
        };
    }

    /// Keeps the selection within the current selectable list.
    pub(crate) fn clamp_focus(&mut self) {
        if let Focus::Item(index) = self.focus {
            let count = self.selectable_items().len();
            self.focus = if count == 0 {
                Focus::Input
            } else {
                Focus::Item(index.min(count - 1))
            };
        }
    }

    /// Computes a renderable view model for the given terminal size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, chrono::Utc::now().timestamp())
    }

    /// Like [`AppState::compute_viewmodel`] with an explicit clock, used for
    /// the "updated N ago" header status.
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: i64) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols, screen = ?self.screen()).entered();

        let available_rows = rows.saturating_sub(CHROME_ROWS);

        UIViewModel {
            header: self.compute_header(now),
            error_banner: self.error.clone(),
            search_bar: SearchBarInfo {
                query: self.query.clone(),
                is_focused: self.focus == Focus::Input,
            },
            body: self.compute_body(available_rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self, now: i64) -> HeaderInfo {
        let status = if self.refreshing {
            Some("refreshing…".to_string())
        } else {
            self.last_loaded
                .map(|loaded| format!("updated {}", time_ago(loaded, now)))
        };

        HeaderInfo {
            title: " Product Search ".to_string(),
            status,
        }
    }

    fn compute_body(&self, available_rows: usize, cols: usize) -> BodyView {
        match self.screen() {
            Screen::Loading => {
                let message = if self.refreshing {
                    "Refreshing…".to_string()
                } else if self.latest_search.is_some() {
                    format!("Searching for \"{}\"…", self.query.trim())
                } else {
                    "Loading…".to_string()
                };
                BodyView::Loading(EmptyState {
                    message,
                    subtitle: "Waiting for the search service".to_string(),
                })
            }
            Screen::Suggestions => {
                let matcher = SkimMatcherV2::default();
                let items = self.visible_suggestions();
                let range = window(items.len(), self.selected_index(), available_rows.saturating_sub(1));
                let display = range
                    .map(|index| DisplayItem {
                        label: truncate(&items[index], cols.saturating_sub(4)),
                        is_selected: self.focus == Focus::Item(index),
                        highlight_ranges: self.compute_highlight_ranges(&items[index], &matcher),
                    })
                    .collect();
                BodyView::Lists(vec![ListSection {
                    title: "SUGGESTIONS".to_string(),
                    items: display,
                }])
            }
            Screen::Results => self.compute_results(available_rows, cols),
            Screen::Browse => self.compute_browse(available_rows, cols),
            Screen::Empty => BodyView::Empty(EmptyState {
                message: "Start typing to search products".to_string(),
                subtitle: "Ctrl+r loads trending searches and categories".to_string(),
            }),
        }
    }

    fn compute_browse(&self, available_rows: usize, cols: usize) -> BodyView {
        let selected = self.selected_index();
        let trending_len = self.trending.len();

        // Two section titles and the blank row between them.
        let item_rows = available_rows.saturating_sub(3);
        let trending_rows = if self.categories.is_empty() {
            item_rows
        } else {
            let fair_share = (item_rows / 2).max(item_rows.saturating_sub(self.categories.len()));
            trending_len.min(fair_share)
        };
        let category_rows = item_rows.saturating_sub(trending_rows);

        let section = |title: &str, list: &[String], offset: usize, capacity: usize| {
            let local_selected = selected
                .filter(|index| (offset..offset + list.len()).contains(index))
                .map(|index| index - offset);
            let items = window(list.len(), local_selected, capacity)
                .map(|index| DisplayItem {
                    label: truncate(&list[index], cols.saturating_sub(4)),
                    is_selected: local_selected == Some(index),
                    highlight_ranges: vec![],
                })
                .collect();
            ListSection {
                title: title.to_string(),
                items,
            }
        };

        let mut sections = Vec::new();
        if !self.trending.is_empty() {
            sections.push(section("TRENDING", &self.trending, 0, trending_rows));
        }
        if !self.categories.is_empty() {
            sections.push(section("CATEGORIES", &self.categories, trending_len, category_rows));
        }
        BodyView::Lists(sections)
    }

    fn compute_results(&self, available_rows: usize, cols: usize) -> BodyView {
        let Some(results) = &self.results else {
            return BodyView::Lists(vec![]);
        };

        let summary = if results.products.is_empty() {
            format!("No products found for \"{}\"", results.query)
        } else {
            format!(
                "{} of {} products for \"{}\"",
                results.products.len(),
                results.total,
                results.query
            )
        };

        let name_width = cols.saturating_sub(PRICE_COLUMN_WIDTH + 22);
        let capacity = available_rows.saturating_sub(2);
        let rows = results
            .products
            .iter()
            .take(capacity)
            .map(|product| ResultRow {
                name: truncate(&product.name, name_width),
                category: truncate(product.category.as_deref().unwrap_or(""), 18),
                price: product.display_price(),
            })
            .collect();

        BodyView::Results { summary, rows }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.screen() {
            Screen::Loading => "Ctrl+u: clear  Esc: close".to_string(),
            Screen::Suggestions | Screen::Browse => {
                "↑/↓: select  Enter: search  Ctrl+u: clear  Ctrl+r: refresh  Esc: close".to_string()
            }
            Screen::Results => "Type to refine  Enter: search  Ctrl+u: clear  Ctrl+r: refresh".to_string(),
            Screen::Empty => "Type to search  Ctrl+r: refresh  Esc: close".to_string(),
        };
        FooterInfo { keybindings }
    }

    const fn selected_index(&self) -> Option<usize> {
        match self.focus {
            Focus::Input => None,
            Focus::Item(index) => Some(index),
        }
    }

    /// Character ranges of `text` matched by the query, coalesced into runs.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let query = self.query.trim();
        if query.is_empty() {
            return vec![];
        }

        let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }
}

/// Picks the visible slice of a list of `len` items that fits `capacity`
/// rows, keeping `selected` roughly centred.
fn window(len: usize, selected: Option<usize>, capacity: usize) -> Range<usize> {
    if len <= capacity {
        return 0..len;
    }
    let Some(selected) = selected else {
        return 0..capacity;
    };

    let start = selected.saturating_sub(capacity / 2).min(len - capacity);
    start..start + capacity
}

/// Shortens `text` to at most `max_chars` characters, ending in "...".
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn state() -> AppState {
        AppState::new(Theme::default())
    }

    #[test]
    fn screen_precedence() {
        let mut s = state();
        s.trending = vec!["shoes".into()];
        assert_eq!(s.screen(), Screen::Browse);

        s.results = Some(SearchResults {
            query: "x".into(),
            products: vec![],
            total: 0,
        });
        assert_eq!(s.screen(), Screen::Results);

        s.query = "sh".into();
        s.suggestions = vec!["shoes".into()];
        s.suggestions_visible = true;
        assert_eq!(s.screen(), Screen::Suggestions);

        s.loading = true;
        assert_eq!(s.screen(), Screen::Loading);
    }

    #[test]
    fn browse_selection_spans_trending_then_categories() {
        let mut s = state();
        s.trending = vec!["t1".into(), "t2".into()];
        s.categories = vec!["c1".into()];

        assert_eq!(s.selectable_items(), vec!["t1", "t2", "c1"]);

        s.move_selection_down();
        assert_eq!(s.selected_item().as_deref(), Some("t1"));
        s.move_selection_down();
        s.move_selection_down();
        assert_eq!(s.selected_item().as_deref(), Some("c1"));
        s.move_selection_down();
        assert_eq!(s.focus, Focus::Input);

        s.move_selection_up();
        assert_eq!(s.selected_item().as_deref(), Some("c1"));
    }

    #[test]
    fn selection_stays_on_input_without_items() {
        let mut s = state();
        s.move_selection_down();
        assert_eq!(s.focus, Focus::Input);
        s.move_selection_up();
        assert_eq!(s.focus, Focus::Input);
    }

    #[test]
    fn suggestions_capped_by_max() {
        let mut s = AppState::with_settings(Theme::default(), Duration::from_millis(300), 2);
        s.query = "a".into();
        s.suggestions = vec!["a1".into(), "a2".into(), "a3".into()];
        s.suggestions_visible = true;

        assert_eq!(s.selectable_items(), vec!["a1", "a2"]);
    }

    #[test]
    fn clamp_focus_after_list_shrinks() {
        let mut s = state();
        s.trending = vec!["a".into(), "b".into(), "c".into()];
        s.focus = Focus::Item(2);
        s.trending.truncate(1);
        s.clamp_focus();
        assert_eq!(s.focus, Focus::Item(0));

        s.trending.clear();
        s.clamp_focus();
        assert_eq!(s.focus, Focus::Input);
    }

    #[test]
    fn viewmodel_highlights_query_in_suggestions() {
        let mut s = state();
        s.query = "sho".into();
        s.suggestions = vec!["shoes".into()];
        s.suggestions_visible = true;

        let vm = s.compute_viewmodel_at(24, 80, 0);
        match vm.body {
            BodyView::Lists(sections) => {
                assert_eq!(sections[0].title, "SUGGESTIONS");
                assert_eq!(sections[0].items[0].highlight_ranges, vec![(0, 3)]);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn viewmodel_header_status() {
        let mut s = state();
        s.last_loaded = Some(1_000);
        let vm = s.compute_viewmodel_at(24, 80, 1_000 + 120);
        assert_eq!(vm.header.status.as_deref(), Some("updated 2m ago"));

        s.refreshing = true;
        let vm = s.compute_viewmodel_at(24, 80, 1_000);
        assert_eq!(vm.header.status.as_deref(), Some("refreshing…"));
    }

    #[test]
    fn viewmodel_results_summary_and_rows() {
        let mut s = state();
        s.results = Some(SearchResults {
            query: "lamp".into(),
            products: vec![Product {
                id: "1".into(),
                name: "Desk lamp".into(),
                price: Some(19.0),
                category: Some("Home".into()),
            }],
            total: 12,
        });

        let vm = s.compute_viewmodel_at(24, 80, 0);
        match vm.body {
            BodyView::Results { summary, rows } => {
                assert_eq!(summary, "1 of 12 products for \"lamp\"");
                assert_eq!(rows[0].price, "19.00");
                assert_eq!(rows[0].category, "Home");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn window_keeps_selection_visible() {
        assert_eq!(window(3, Some(2), 10), 0..3);
        assert_eq!(window(20, None, 5), 0..5);
        assert_eq!(window(20, Some(10), 5), 8..13);
        assert_eq!(window(20, Some(19), 5), 15..20);
    }

    #[test]
    fn truncate_is_char_aware() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("très très long", 8), "très ...");
    }
}
