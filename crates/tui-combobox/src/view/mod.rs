// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View Layer - Pure Rendering and Presentation
//!
//! This module transforms ViewModel state into Ratatui widgets. It is the
//! final step of the MVVM pipeline and contains zero business logic: no
//! key handling, no state mutation, no filtering.
//!
//! ## View Output:
//!
//! The only output besides the drawn frame is a collection of hit test
//! rectangles, registered during rendering and used by the input
//! dispatcher to decide which mouse presses should be delivered to the
//! ViewModel as semantic actions.

pub mod combo_box;
pub mod hit_test;

pub use combo_box::render_combo_box;
pub use hit_test::{HitTestRegistry, HitZone};
