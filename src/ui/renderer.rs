//! Top-level rendering coordinator.
//!
//! Rendering is two steps: `AppState` is turned into a [`UIViewModel`], then
//! the components lay the view model out into one frame of ANSI text, which
//! is printed in a single write.
//!
//! # Example
//!
//! ```rust
//! use shopsearch::app::AppState;
//! use shopsearch::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(Theme::default());
//! let frame = render_to_string(&state, 24, 80);
//! assert!(frame.contains("Product Search"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders one frame for `state` without printing it.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Lays out a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut frame = String::new();
    components::render_screen(&mut frame, vm, theme, cols, rows);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, SearchResults, GENERIC_FAILURE_MESSAGE};
    use crate::ui::helpers::strip_ansi;

    fn frame(state: &AppState) -> String {
        strip_ansi(&render_to_string(state, 24, 80))
    }

    #[test]
    fn empty_screen_shows_prompt() {
        let state = AppState::new(Theme::default());
        let text = frame(&state);
        assert!(text.contains("Product Search"));
        assert!(text.contains("Search:"));
        assert!(text.contains("Start typing to search products"));
    }

    #[test]
    fn error_banner_is_rendered() {
        let mut state = AppState::new(Theme::default());
        state.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
        assert!(frame(&state).contains(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn loading_hides_suggestions() {
        let mut state = AppState::new(Theme::default());
        state.query = "sho".into();
        state.suggestions = vec!["shoes".into()];
        state.suggestions_visible = true;
        state.loading = true;

        let text = frame(&state);
        assert!(text.contains("Loading"));
        assert!(!text.contains("SUGGESTIONS"));
    }

    #[test]
    fn browse_lists_are_rendered() {
        let mut state = AppState::new(Theme::default());
        state.trending = vec!["desk lamp".into()];
        state.categories = vec!["Garden".into()];

        let text = frame(&state);
        assert!(text.contains("TRENDING"));
        assert!(text.contains("desk lamp"));
        assert!(text.contains("CATEGORIES"));
        assert!(text.contains("Garden"));
    }

    #[test]
    fn results_table_is_rendered() {
        let mut state = AppState::new(Theme::default());
        state.results = Some(SearchResults {
            query: "lamp".into(),
            products: vec![Product {
                id: "1".into(),
                name: "Desk lamp".into(),
                price: Some(24.5),
                category: Some("Home".into()),
            }],
            total: 1,
        });

        let text = frame(&state);
        assert!(text.contains("NAME"));
        assert!(text.contains("Desk lamp"));
        assert!(text.contains("24.50"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut state = AppState::new(Theme::default());
        state.trending = (0..50).map(|i| format!("trend {i}")).collect();
        let _ = render_to_string(&state, 3, 5);
        let _ = render_to_string(&state, 0, 0);
    }
}
