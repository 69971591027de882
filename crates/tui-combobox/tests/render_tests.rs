// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Render tests against the deterministic TestBackend: menu rows, hit
//! zones, the scroll window, and overlay placement.

mod common;

use common::{
    build_widget, buffer_contains, key, registered_row_indices, render_frame, render_frame_at,
    type_text,
};
use ratatui::crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};
use tui_combobox::{ComboBoxConfig, ComboBoxViewModel, ComboMouseAction, Theme};

#[test]
fn closed_widget_renders_only_the_field() {
    let vm = build_widget();
    let (buffer, registry) = render_frame(&vm);

    assert!(
        buffer_contains(&buffer, "Type to search"),
        "the empty field shows its placeholder"
    );
    assert!(!buffer_contains(&buffer, "Label One"), "no menu rows while closed");
    assert_eq!(registry.len(), 1, "only the field activation zone is registered");
    assert_eq!(registry.hit_test(5, 1), Some(&ComboMouseAction::ActivateField));
    assert_eq!(registry.hit_test(35, 8), None);
}

#[test]
fn open_menu_lists_groups_leaves_and_the_create_row() {
    let mut vm = build_widget();
    type_text(&mut vm, "a");

    let (buffer, registry) = render_frame(&vm);

    for expected in ["Label One", "Fruits", "Apple", "Banana", "Vegetables", "Carrot"] {
        assert!(buffer_contains(&buffer, expected), "missing menu row {expected:?}");
    }
    assert!(
        buffer_contains(&buffer, "Create \"a\""),
        "the create proposal renders quoted after the matches"
    );
    assert_eq!(
        registered_row_indices(&registry),
        vec![0, 1, 3, 4, 6, 7],
        "one zone per selectable row, headers skipped"
    );
}

#[test]
fn hit_zones_resolve_rows_and_fall_through_on_headers() {
    let mut vm = build_widget();
    type_text(&mut vm, "a");

    let (_, registry) = render_frame(&vm);

    // The menu starts right under the field box at y = 3; display row 2 is
    // the Fruits header, display row 3 is Apple.
    assert_eq!(registry.hit_test(5, 6), Some(&ComboMouseAction::SelectRow(3)));
    assert_eq!(registry.hit_test(5, 10), Some(&ComboMouseAction::SelectRow(7)));
    assert_eq!(registry.hit_test(5, 5), None, "header rows take no press");
    assert_eq!(registry.hit_test(5, 1), Some(&ComboMouseAction::ActivateField));
}

#[test]
fn menu_scrolls_to_keep_the_highlight_visible() {
    let config = ComboBoxConfig {
        max_visible_rows: Some(3),
        ..ComboBoxConfig::default()
    };
    let mut vm = ComboBoxViewModel::with_config(common::sample_model(), config);
    type_text(&mut vm, "a");
    for _ in 0..5 {
        vm.handle_key_event(&key(KeyCode::Down));
    }
    assert_eq!(vm.selected_index(), 7, "the highlight sits on the create row");

    let (buffer, registry) = render_frame(&vm);

    assert!(buffer_contains(&buffer, "Carrot"));
    assert!(buffer_contains(&buffer, "Create \"a\""));
    assert!(
        !buffer_contains(&buffer, "Label One") && !buffer_contains(&buffer, "Apple"),
        "rows scrolled out of the window are not drawn"
    );
    assert_eq!(
        registered_row_indices(&registry),
        vec![6, 7],
        "zones carry the display indices of the visible window"
    );
}

#[test]
fn menu_opens_above_when_the_space_below_is_short() {
    let mut vm = build_widget();
    type_text(&mut vm, "a");

    let (buffer, registry) = render_frame_at(&vm, Rect::new(0, 10, 30, 3), 40, 16);

    let first_row_zone = registry
        .zones()
        .iter()
        .find(|zone| matches!(zone.action, ComboMouseAction::SelectRow(0)))
        .expect("a zone for the first row");
    assert_eq!(
        first_row_zone.rect.y, 2,
        "eight rows above a field at y = 10 start at y = 2"
    );
    assert!(buffer_contains(&buffer, "Label One"));
}

#[test]
fn highlight_and_header_rows_carry_their_styles() {
    let theme = Theme::default();
    let mut vm = build_widget();
    type_text(&mut vm, "a");

    let (buffer, _) = render_frame(&vm);

    // Display row 0 (Label One) holds the highlight; display row 2 is the
    // dimmed Fruits header. The menu starts at y = 3.
    let highlight_cell = buffer.cell((0, 3)).expect("highlight cell");
    assert_eq!(
        highlight_cell.style().bg,
        Some(theme.primary),
        "the highlighted row uses the focused style"
    );

    let header_cell = buffer.cell((0, 5)).expect("header cell");
    assert!(
        header_cell.style().add_modifier.contains(Modifier::DIM),
        "group headers render dimmed"
    );
    assert_eq!(header_cell.style().bg, Some(theme.surface));
}

#[test]
fn unmatched_query_renders_just_the_quoted_create_row() {
    let mut vm = build_widget();
    type_text(&mut vm, "zzz");

    let (buffer, registry) = render_frame(&vm);

    assert!(buffer_contains(&buffer, "Create \"zzz\""));
    assert!(!buffer_contains(&buffer, "Fruits"));
    assert_eq!(registered_row_indices(&registry), vec![0]);
}

#[test]
fn focused_field_border_differs_from_the_blurred_one() {
    let theme = Theme::default();
    let mut vm = build_widget();

    let (blurred, _) = render_frame(&vm);
    vm.handle_focus_gained();
    let (focused, _) = render_frame(&vm);

    let corner = |buffer: &ratatui::buffer::Buffer| -> Option<Color> {
        buffer.cell((0, 0)).expect("corner cell").style().fg
    };
    assert_eq!(corner(&blurred), Some(theme.border));
    assert_eq!(corner(&focused), Some(theme.border_focused));
}
