// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! ViewModel Layer - UI State and Presentation Models
//!
//! This module holds the selector widget's state machine and input
//! processing: the query text, the derived menu rows, the keyboard
//! highlight, the open/closed visibility of the menu, and the committed
//! form value. No rendering happens here.
//!
//! ## Primary Mission: Headless Testing
//!
//! Everything in this layer is driven by plain values (key events, mouse
//! actions, `Instant`s supplied by the caller) so the whole widget can be
//! exercised in tests without a terminal and without sleeping: the delayed
//! close after focus loss is a deadline observed by
//! [`ComboBoxViewModel::tick`], not a timer thread.
//!
//! ## What Does NOT Belong Here:
//!
//! ❌ **Rendering**: Ratatui widget creation, styling, layout
//! ❌ **Terminal plumbing**: raw mode, event polling, draw loops

pub mod combo_box;

// Re-export the main types
pub use combo_box::{ComboBoxViewModel, ComboKeyResult, Visibility, BLUR_CLOSE_GRACE};

/// Semantic mouse actions produced by hit-testing the rendered widget.
/// The view registers one zone per selectable menu row and one for the
/// text field itself; anything outside both is an outside press and is
/// handled by [`ComboBoxViewModel::handle_press_outside`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboMouseAction {
    /// Pointer press on the text field: focus it and open the menu.
    ActivateField,
    /// Pointer press on the selectable menu row at this display index.
    SelectRow(usize),
}

/// Form-association seam. The surrounding form binds one sink per widget;
/// every commit signals it exactly once with the committed value, or `None`
/// when a commit resolved to nothing.
pub trait FormValueSink: Send + Sync {
    fn set_value(&self, value: Option<String>);
}
