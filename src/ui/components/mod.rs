//! Composable UI component renderers.
//!
//! Each component writes one part of the screen into the frame buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with load status
//! - [`banner`]: Error message line above the search bar
//! - [`search`]: Search input box
//! - [`list`]: Titled lists (suggestions, trending, categories)
//! - [`table`]: Product results table
//! - [`empty`]: Loading and empty state messages
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Error banner]
//! [Search Bar - 3 lines]
//! [Body: lists, results table, or a centered message]
//! [Border]
//! [Footer]
//! ```

pub mod banner;
pub mod empty;
pub mod footer;
pub mod header;
pub mod list;
pub mod search;
pub mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the complete screen layout into `out`.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = header::render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = banner::render_error_banner(out, current_row, vm.error_banner.as_deref(), theme, cols);
    current_row = search::render_search_bar(out, current_row, &vm.search_bar, theme, cols);

    let footer_row = rows.saturating_sub(1).max(current_row + 1);
    let border_row = footer_row - 1;
    let last_body_row = border_row.saturating_sub(1);

    match &vm.body {
        BodyView::Loading(message) | BodyView::Empty(message) => {
            empty::render_empty_state(out, current_row, message, theme, cols);
        }
        BodyView::Lists(sections) => {
            list::render_sections(out, current_row, last_body_row, sections, theme, cols);
        }
        BodyView::Results { summary, rows: products } => {
            current_row = table::render_summary(out, current_row, summary, theme);
            if !products.is_empty() {
                current_row = table::render_table_headers(out, current_row, theme, cols);
                table::render_table_rows(out, current_row, last_body_row, products, theme, cols);
            }
        }
    }

    render_border(out, border_row, &theme.colors.border, cols);
    footer::render_footer(out, footer_row, &vm.footer, theme, cols);
}
