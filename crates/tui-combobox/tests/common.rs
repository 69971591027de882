// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared test utilities for selector widget tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tui_combobox::{
    ComboBoxViewModel, ComboMouseAction, FormValueSink, HitTestRegistry, OptionsModel, Theme,
    create_test_terminal, render_combo_box,
};

/// The option set used across the behavior tests: two direct entries ahead
/// of two groups, so flattening, group filtering, and header rows are all
/// exercised.
pub fn sample_model() -> OptionsModel {
    OptionsModel::builder()
        .option("v1", "Label One")
        .option("v2", "Label Two")
        .group("Fruits", [("apple", "Apple"), ("banana", "Banana")])
        .group("Vegetables", [("carrot", "Carrot")])
        .build()
}

pub fn build_widget() -> ComboBoxViewModel {
    ComboBoxViewModel::new(sample_model())
}

/// Form sink that records every signaled value in order.
#[derive(Default)]
pub struct RecordingFormSink {
    calls: Mutex<Vec<Option<String>>>,
}

impl RecordingFormSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().expect("sink poisoned").clone()
    }

    pub fn last(&self) -> Option<Option<String>> {
        self.calls.lock().expect("sink poisoned").last().cloned()
    }
}

impl FormValueSink for RecordingFormSink {
    fn set_value(&self, value: Option<String>) {
        self.calls.lock().expect("sink poisoned").push(value);
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

/// Type a string into the widget one character at a time, the way terminal
/// input arrives.
pub fn type_text(vm: &mut ComboBoxViewModel, text: &str) {
    for ch in text.chars() {
        vm.handle_key_event(&key(KeyCode::Char(ch)));
    }
}

/// Render one frame with the field box at `field_area`; returns the buffer
/// and the hit zones the view registered.
pub fn render_frame_at(
    vm: &ComboBoxViewModel,
    field_area: Rect,
    width: u16,
    height: u16,
) -> (Buffer, HitTestRegistry<ComboMouseAction>) {
    let mut terminal = create_test_terminal(width, height);
    let mut registry = HitTestRegistry::new();
    let theme = Theme::default();
    terminal
        .draw(|frame| render_combo_box(frame, field_area, vm, &theme, &mut registry))
        .expect("draw frame");
    (terminal.backend().buffer().clone(), registry)
}

/// Render with the field box in the top-left corner of a 40x16 screen.
pub fn render_frame(vm: &ComboBoxViewModel) -> (Buffer, HitTestRegistry<ComboMouseAction>) {
    render_frame_at(vm, Rect::new(0, 0, 30, 3), 40, 16)
}

/// The buffer's rows as plain strings, trailing blanks trimmed.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = *buffer.area();
    (0..area.height)
        .map(|y| {
            let line: String = (0..area.width)
                .map(|x| {
                    buffer
                        .cell((x, y))
                        .map(|cell| cell.symbol().chars().next().unwrap_or(' '))
                        .unwrap_or(' ')
                })
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    buffer_lines(buffer).iter().any(|line| line.contains(needle))
}

/// The display-row indices the registry maps presses to, in registration
/// order, ignoring the field activation zone.
pub fn registered_row_indices(registry: &HitTestRegistry<ComboMouseAction>) -> Vec<usize> {
    registry
        .zones()
        .iter()
        .filter_map(|zone| match zone.action {
            ComboMouseAction::SelectRow(index) => Some(index),
            ComboMouseAction::ActivateField => None,
        })
        .collect()
}
