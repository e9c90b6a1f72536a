//! Results table renderer.
//!
//! Three columns: NAME, CATEGORY and a right-aligned PRICE.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ResultRow;

const CATEGORY_WIDTH: usize = 20;
const PRICE_WIDTH: usize = 12;

fn name_width(cols: usize) -> usize {
    cols.saturating_sub(CATEGORY_WIDTH + PRICE_WIDTH).max(8)
}

/// Renders the result summary line and returns the next row.
pub fn render_summary(out: &mut String, row: usize, summary: &str, theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(summary);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the column headers and returns the next row.
pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!(
        "{:<name$}{:<CATEGORY_WIDTH$}{:>PRICE_WIDTH$}",
        "NAME",
        "CATEGORY",
        "PRICE",
        name = name_width(cols),
    ));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders product rows starting at `row`, stopping before `last_row`.
/// Returns the next free row.
pub fn render_table_rows(
    out: &mut String,
    row: usize,
    last_row: usize,
    rows: &[ResultRow],
    theme: &Theme,
    cols: usize,
) -> usize {
    let name_width = name_width(cols);
    let mut current_row = row;

    for result in rows {
        if current_row > last_row {
            break;
        }
        position_cursor(out, current_row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&result.name);
        out.push_str(&" ".repeat(name_width.saturating_sub(width(&result.name))));

        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&result.category);
        out.push_str(&" ".repeat(CATEGORY_WIDTH.saturating_sub(width(&result.category))));

        out.push_str(&Theme::fg(&theme.colors.price_fg));
        out.push_str(&format!("{:>PRICE_WIDTH$}", result.price));
        out.push_str(Theme::reset());
        current_row += 1;
    }
    current_row
}
