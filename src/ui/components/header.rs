//! Header component renderer.
//!
//! Centered bold title with an optional status right-aligned on the same line.

use crate::ui::helpers::{position_cursor, push_centered, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at `row` and returns the next row.
///
/// ```text
/// [padding] Product Search [padding]  updated 2m ago
/// ```
///
/// The status is dropped when it would overlap the title.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    push_centered(out, &header.title, cols);
    out.push_str(Theme::reset());

    if let Some(status) = &header.status {
        let status_len = width(status);
        let title_end = (cols + width(&header.title)) / 2;
        if title_end + status_len + 2 <= cols {
            position_cursor(out, row, cols - status_len);
            out.push_str(&Theme::fg(&theme.colors.status_fg));
            out.push_str(status);
            out.push_str(Theme::reset());
        }
    }

    row + 1
}
