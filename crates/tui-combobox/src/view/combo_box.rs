// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Rendering for the selector widget: the bordered text field and, while
//! the menu is open, the row overlay under (or above) it.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState},
};
use unicode_segmentation::UnicodeSegmentation as _;
use unicode_width::UnicodeWidthStr;

use crate::options::ComboRow;
use crate::theme::Theme;
use crate::view::hit_test::HitTestRegistry;
use crate::view_model::{ComboBoxViewModel, ComboMouseAction};

/// Draw one selector widget into `area` (the field box, border included)
/// and register its hit zones: the whole field activates it, each visible
/// selectable menu row resolves to its display index. Group header rows get
/// no zone, so a press on one falls through to whatever is underneath.
pub fn render_combo_box(
    frame: &mut Frame<'_>,
    area: Rect,
    vm: &ComboBoxViewModel,
    theme: &Theme,
    hit_registry: &mut HitTestRegistry<ComboMouseAction>,
) {
    let block = theme.field_block(vm.is_focused());
    let field_inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(vm.input(), field_inner);
    hit_registry.register(area, ComboMouseAction::ActivateField);

    if !vm.is_open() {
        return;
    }

    let rows = vm.rows();
    let total = rows.len();
    if total == 0 {
        return;
    }

    // The menu goes below the field when it fits, above otherwise, and
    // shrinks to whatever the screen allows.
    let screen = frame.area();
    let below_y = area.y.saturating_add(area.height);
    let space_below = screen.height.saturating_sub(below_y) as usize;
    let space_above = area.y.saturating_sub(screen.y) as usize;
    let capacity = vm
        .config()
        .max_visible_rows()
        .max(1)
        .min(space_below.max(space_above));
    if capacity == 0 {
        return;
    }

    // Scroll window centered on the highlight.
    let selected = vm.selected_index().min(total - 1);
    let start = if total <= capacity {
        0
    } else {
        let half = capacity / 2;
        let max_start = total - capacity;
        selected.saturating_sub(half).min(max_start)
    };
    let end = (start + capacity).min(total);
    let visible = &rows[start..end];

    let menu_height = visible.len() as u16;
    let menu_y = if space_below >= visible.len() {
        below_y
    } else {
        area.y - menu_height
    };
    let menu = Rect {
        x: area.x,
        y: menu_y,
        width: area.width,
        height: menu_height,
    };

    frame.render_widget(Clear, menu);

    for (offset, row) in visible.iter().enumerate() {
        if row.is_selectable() {
            let row_rect = Rect {
                x: menu.x,
                y: menu.y + offset as u16,
                width: menu.width,
                height: 1,
            };
            hit_registry.register(row_rect, ComboMouseAction::SelectRow(start + offset));
        }
    }

    let items: Vec<ListItem> =
        visible.iter().map(|row| menu_row_item(row, menu.width, theme)).collect();

    let mut state = ListState::default();
    state.select(Some(selected - start));

    let list = List::new(items)
        .style(Style::default().bg(theme.surface))
        .highlight_style(theme.focused_style());

    frame.render_stateful_widget(list, menu, &mut state);
}

fn menu_row_item(row: &ComboRow, width: u16, theme: &Theme) -> ListItem<'static> {
    let (text, style) = match row {
        ComboRow::GroupLabel(label) => (
            label.clone(),
            theme.muted_style().add_modifier(Modifier::DIM),
        ),
        ComboRow::Option(option) => (option.label.clone(), theme.text_style()),
        ComboRow::Create(text) => (format!("Create \"{text}\""), theme.accent_style()),
    };
    ListItem::new(Line::from(Span::styled(truncate_by_width(&text, width), style)))
}

fn truncate_by_width(text: &str, max_width: u16) -> String {
    let mut remaining = max_width as usize;
    let mut result = String::new();

    for grapheme in text.graphemes(true) {
        let width = UnicodeWidthStr::width(grapheme);
        if width == 0 {
            continue;
        }
        if width > remaining {
            break;
        }
        result.push_str(grapheme);
        remaining -= width;
        if remaining == 0 {
            break;
        }
    }

    result
}
