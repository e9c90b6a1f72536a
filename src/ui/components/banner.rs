//! Error banner component renderer.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;

/// Renders the error line above the search bar and returns the next row.
///
/// The row is always consumed so the search bar does not jump when an error
/// appears or clears.
pub fn render_error_banner(out: &mut String, row: usize, error: Option<&str>, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    match error {
        Some(message) => {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.error_fg));
            push_centered(out, &format!("⚠ {message}"), cols);
            out.push_str(Theme::reset());
        }
        None => out.push_str(&" ".repeat(cols)),
    }
    row + 1
}
