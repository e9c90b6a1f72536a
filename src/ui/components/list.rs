//! Titled list renderer for suggestions, trending searches and categories.

use crate::ui::helpers::{self, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ListSection};

/// Indent applied to list items under their section title.
const ITEM_INDENT: usize = 2;

/// Renders sections one after another, separated by a blank row, stopping
/// before `last_row`. Returns the next free row.
pub fn render_sections(
    out: &mut String,
    row: usize,
    last_row: usize,
    sections: &[ListSection],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            current_row += 1;
        }
        if current_row > last_row {
            break;
        }

        position_cursor(out, current_row, 1);
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.section_fg));
        out.push_str(&section.title);
        out.push_str(Theme::reset());
        current_row += 1;

        for item in &section.items {
            if current_row > last_row {
                break;
            }
            current_row = render_item(out, current_row, item, theme, cols);
        }
    }
    current_row
}

/// Renders one item, padded to the full width so the selection background
/// covers the whole row.
fn render_item(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(ITEM_INDENT));

    if item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
        out.push_str("› ");
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str("  ");
    }

    helpers::render_highlighted_text(out, &item.label, &item.highlight_ranges, theme, item.is_selected);

    let used = ITEM_INDENT + 2 + width(&item.label);
    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    out.push_str(Theme::reset());
    row + 1
}
