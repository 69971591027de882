// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Searchable dropdown selector widget for Ratatui forms
//!
//! This crate provides a combo box that behaves like a native selection
//! control but supports free-text filtering, grouped options, and
//! on-the-fly creation of new entries. The headless view model carries all
//! state; rendering is a pure function over it.

pub mod config;
pub mod options;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod view_model;

pub use config::{ComboBoxConfig, ConfigLoadError};
pub use options::{
    ComboOption, ComboRow, FilteredView, OptionGroup, OptionNode, OptionsModel,
    OptionsModelBuilder, OptionsParseError, OptionsSource,
};
pub use theme::{Theme, ThemeLoadError};
pub use view::{HitTestRegistry, HitZone, render_combo_box};
pub use view_model::{
    BLUR_CLOSE_GRACE, ComboBoxViewModel, ComboKeyResult, ComboMouseAction, FormValueSink,
    Visibility,
};

use ratatui::{Terminal, backend::TestBackend};

/// Helpers for tests/runners to render with a deterministic backend
pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("test terminal")
}
