// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Selection and visibility state for the dropdown selector widget.
//!
//! [`ComboBoxViewModel`] owns the canonical option model, the single-line
//! query field, the derived menu rows, and the committed form value. It is
//! fully headless: keys, mouse actions, focus signals, and time all arrive
//! as plain values, so every behavior can be asserted in tests without a
//! terminal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use tracing::debug;
use tui_textarea::{CursorMove, TextArea};

use crate::config::ComboBoxConfig;
use crate::options::{ComboOption, ComboRow, OptionsModel, OptionsSource};
use crate::view_model::{ComboMouseAction, FormValueSink};

/// How long a focus loss keeps the menu alive so a click on a row that is
/// already in flight can still resolve.
pub const BLUR_CLOSE_GRACE: Duration = Duration::from_millis(150);

/// Menu display state. The only deferred action is the delayed close after
/// focus loss, held as a deadline next to this value and observed by
/// [`ComboBoxViewModel::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
}

/// Outcome of feeding one key event to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKeyResult {
    /// The widget handled the key. `text_changed` reports whether the
    /// displayed text is different afterwards, so the host knows a redraw
    /// of dependent chrome may be needed.
    Consumed { text_changed: bool },
    /// The key means nothing to the widget in its current state; the host
    /// may use it (e.g. Tab moving focus to the next form field while the
    /// menu is closed).
    Ignored,
}

/// Headless state of one selector widget instance.
pub struct ComboBoxViewModel {
    model: OptionsModel,
    input: TextArea<'static>,
    rows: Vec<ComboRow>,
    selected: usize,
    visibility: Visibility,
    focused: bool,
    pending_close: Option<Instant>,
    committed: Option<String>,
    form: Option<Arc<dyn FormValueSink>>,
    config: ComboBoxConfig,
    pub needs_redraw: bool,
}

impl ComboBoxViewModel {
    pub fn new(model: OptionsModel) -> Self {
        Self::with_config(model, ComboBoxConfig::default())
    }

    pub fn with_config(model: OptionsModel, config: ComboBoxConfig) -> Self {
        let rows = model.filter("").rows();
        let selected = rows.iter().position(ComboRow::is_selectable).unwrap_or(0);
        let input = single_line_input("", config.placeholder());
        Self {
            model,
            input,
            rows,
            selected,
            visibility: Visibility::Closed,
            focused: false,
            pending_close: None,
            committed: None,
            form: None,
            config,
            needs_redraw: true,
        }
    }

    /// Bind the surrounding form's value sink. Call on attach; pair with
    /// [`unbind_form`] on detach so no signal outlives the widget.
    ///
    /// [`unbind_form`]: ComboBoxViewModel::unbind_form
    pub fn bind_form(&mut self, sink: Arc<dyn FormValueSink>) {
        self.form = Some(sink);
    }

    pub fn unbind_form(&mut self) {
        self.form = None;
    }

    pub fn model(&self) -> &OptionsModel {
        &self.model
    }

    pub fn input(&self) -> &TextArea<'static> {
        &self.input
    }

    pub fn config(&self) -> &ComboBoxConfig {
        &self.config
    }

    /// The free text currently shown in the field.
    pub fn display_text(&self) -> &str {
        self.input.lines().first().map(String::as_str).unwrap_or("")
    }

    /// The committed form value; `None` until a resolve commits one (or
    /// after a commit resolved to nothing).
    pub fn value(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn pending_close(&self) -> Option<Instant> {
        self.pending_close
    }

    /// The current display rows, group headers included.
    pub fn rows(&self) -> &[ComboRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Replace the option model wholesale. Malformed JSON input is logged
    /// and skipped inside the model; on an actual replacement the visible
    /// rows are re-derived against the current displayed text so the menu
    /// never shows entries of a model that is gone.
    pub fn set_options(&mut self, source: impl Into<OptionsSource>) {
        if self.model.replace(source) {
            self.refresh_filter();
        }
    }

    /// Seed the displayed text from a value identifier: the matching
    /// entry's label, or empty when the value is unknown. The committed
    /// value and the form sink are deliberately untouched; only an explicit
    /// resolve commits.
    pub fn set_value(&mut self, candidate: &str) {
        let label = self.model.find_by_value(candidate).map(|option| option.label.clone());
        self.set_display_text(label.as_deref().unwrap_or(""));
    }

    /// Feed one key event. Navigation, dismissal, and the commit key are
    /// handled here; everything else is forwarded to the text field, and a
    /// resulting edit re-derives the rows and opens the menu.
    pub fn handle_key_event(&mut self, key: &KeyEvent) -> ComboKeyResult {
        match key.code {
            KeyCode::Down => {
                match self.visibility {
                    // Opening by key shows the rows as last derived; only
                    // an edit recomputes them.
                    Visibility::Closed => self.open_menu(),
                    Visibility::Open => {
                        self.select_next();
                    }
                }
                ComboKeyResult::Consumed {
                    text_changed: false,
                }
            }
            KeyCode::Up => {
                if self.is_open() {
                    self.select_previous();
                    ComboKeyResult::Consumed {
                        text_changed: false,
                    }
                } else {
                    ComboKeyResult::Ignored
                }
            }
            KeyCode::Tab => {
                if self.is_open() && self.rows.get(self.selected).is_some() {
                    self.resolve_row(self.selected);
                    ComboKeyResult::Consumed { text_changed: true }
                } else {
                    ComboKeyResult::Ignored
                }
            }
            KeyCode::Enter => {
                self.commit_query();
                ComboKeyResult::Consumed { text_changed: true }
            }
            KeyCode::Esc => {
                if self.is_open() {
                    self.close_menu();
                    ComboKeyResult::Consumed {
                        text_changed: false,
                    }
                } else {
                    ComboKeyResult::Ignored
                }
            }
            _ => {
                if self.input.input(*key) {
                    self.refresh_filter();
                    self.open_menu();
                    ComboKeyResult::Consumed { text_changed: true }
                } else {
                    ComboKeyResult::Ignored
                }
            }
        }
    }

    /// Activation signal for the field (click or focus).
    pub fn handle_focus_gained(&mut self) {
        self.focused = true;
        self.open_menu();
    }

    /// Focus left the field: keep the menu up for the grace window so an
    /// in-flight row click can still land, then close on `tick`.
    pub fn handle_focus_lost(&mut self, now: Instant) {
        self.focused = false;
        self.needs_redraw = true;
        if self.is_open() && self.pending_close.is_none() {
            self.pending_close = Some(now + self.config.close_grace());
        }
    }

    /// Pointer press outside the field and the menu: close immediately.
    pub fn handle_press_outside(&mut self) {
        self.close_menu();
    }

    /// Observe the delayed-close deadline. Call from the host loop with the
    /// current time; a resolve or explicit close in the meantime has
    /// already cleared the deadline, so a stale tick never closes anything.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.pending_close {
            if now >= deadline {
                self.close_menu();
            }
        }
    }

    pub fn perform_mouse_action(&mut self, action: ComboMouseAction) {
        match action {
            // A press on the field is an activation signal like focus.
            ComboMouseAction::ActivateField => self.handle_focus_gained(),
            ComboMouseAction::SelectRow(index) => self.resolve_row(index),
        }
    }

    /// Move the highlight forward over selectable rows, wrapping past the
    /// end and skipping group headers.
    pub fn select_next(&mut self) -> bool {
        self.step_selection(1)
    }

    /// Move the highlight backward over selectable rows, wrapping past the
    /// start and skipping group headers.
    pub fn select_previous(&mut self) -> bool {
        self.step_selection(-1)
    }

    fn step_selection(&mut self, direction: isize) -> bool {
        if !self.is_open() || self.rows.is_empty() {
            return false;
        }
        let len = self.rows.len();
        let mut candidate = self.selected;
        for _ in 0..len {
            candidate = (candidate as isize + direction).rem_euclid(len as isize) as usize;
            if self.rows[candidate].is_selectable() {
                self.selected = candidate;
                self.needs_redraw = true;
                return true;
            }
        }
        false
    }

    /// Resolve the row at `index`: a regular entry commits its value, the
    /// create row first appends the typed text to the model, a group header
    /// does nothing. The menu closes on every resolve and any pending
    /// delayed close is cancelled, so a click inside the grace window wins.
    pub fn resolve_row(&mut self, index: usize) {
        let Some(row) = self.rows.get(index).cloned() else {
            return;
        };
        match row {
            ComboRow::Option(option) => {
                let ComboOption { value, label } = option;
                self.commit(&label, Some(value));
            }
            ComboRow::Create(text) => {
                let ComboOption { value, label } = self.model.append_value(&text);
                self.commit(&label, Some(value));
            }
            ComboRow::GroupLabel(_) => {}
        }
    }

    /// Commit-key path: the displayed text either names an existing entry
    /// exactly (case-sensitive, against the unfiltered model) and commits
    /// it, or the field and the committed value are cleared. The form sink
    /// is signaled either way.
    pub fn commit_query(&mut self) {
        let text = self.display_text().to_string();
        let found = self.model.find_by_label(&text).cloned();
        match found {
            Some(option) => {
                let ComboOption { value, label } = option;
                self.commit(&label, Some(value));
            }
            None => self.commit("", None),
        }
    }

    pub fn close_menu(&mut self) {
        self.pending_close = None;
        if self.visibility == Visibility::Open {
            self.visibility = Visibility::Closed;
            self.needs_redraw = true;
        }
    }

    fn open_menu(&mut self) {
        self.pending_close = None;
        if self.visibility == Visibility::Closed {
            self.visibility = Visibility::Open;
            self.needs_redraw = true;
        }
    }

    fn commit(&mut self, label: &str, value: Option<String>) {
        self.set_display_text(label);
        self.committed = value;
        if let Some(form) = &self.form {
            form.set_value(self.committed.clone());
        }
        debug!(value = ?self.committed, "selector committed");
        self.close_menu();
    }

    fn set_display_text(&mut self, text: &str) {
        self.input = single_line_input(text, self.config.placeholder());
        self.needs_redraw = true;
    }

    fn refresh_filter(&mut self) {
        let query = self.display_text().to_string();
        self.rows = self.model.filter(&query).rows();
        self.selected = self.rows.iter().position(ComboRow::is_selectable).unwrap_or(0);
        self.needs_redraw = true;
    }
}

impl std::fmt::Debug for ComboBoxViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboBoxViewModel")
            .field("display_text", &self.display_text())
            .field("committed", &self.committed)
            .field("visibility", &self.visibility)
            .field("focused", &self.focused)
            .field("rows", &self.rows.len())
            .field("selected", &self.selected)
            .field("pending_close", &self.pending_close.is_some())
            .finish()
    }
}

fn single_line_input(text: &str, placeholder: &str) -> TextArea<'static> {
    let mut input = if text.is_empty() {
        TextArea::default()
    } else {
        TextArea::from([text.to_string()])
    };
    input.set_placeholder_text(placeholder);
    input.set_cursor_line_style(Style::default());
    input.move_cursor(CursorMove::End);
    input
}
