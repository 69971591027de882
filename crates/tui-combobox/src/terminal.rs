// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal Management - Shared terminal setup and cleanup procedures
//!
//! Raw mode, alternate screen, mouse capture, and focus-change reporting
//! for the demo binaries. Cleanup is idempotent and hooked into panics so
//! the terminal is restored before a backtrace prints.

use crossterm::{
    ExecutableCommand,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io, panic,
    sync::atomic::{AtomicBool, Ordering},
};

// Global flag to ensure cleanup only happens once
static CLEANUP_DONE: AtomicBool = AtomicBool::new(false);

// Track what we modified so we can restore properly
static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALTERNATE_SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);
static MOUSE_CAPTURE_ENABLED: AtomicBool = AtomicBool::new(false);
static FOCUS_CHANGE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Setup the terminal for the widget demo: raw mode, alternate screen,
/// mouse capture, and focus-change events (the widget reacts to focus
/// gain/loss). Installs a panic hook that restores the terminal first.
pub fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();

    crossterm::terminal::enable_raw_mode()?;
    RAW_MODE_ENABLED.store(true, Ordering::SeqCst);

    stdout.execute(EnterAlternateScreen)?;
    ALTERNATE_SCREEN_ACTIVE.store(true, Ordering::SeqCst);

    stdout.execute(EnableMouseCapture)?;
    MOUSE_CAPTURE_ENABLED.store(true, Ordering::SeqCst);

    stdout.execute(EnableFocusChange)?;
    FOCUS_CHANGE_ENABLED.store(true, Ordering::SeqCst);

    let default_panic = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        default_panic(panic_info);
    }));

    Ok(())
}

/// Cleanup terminal after the demo. Safe to call more than once; only the
/// first call does anything.
pub fn cleanup_terminal() {
    if CLEANUP_DONE.swap(true, Ordering::SeqCst) {
        return; // Already cleaned up
    }

    let mut stdout = io::stdout();

    if FOCUS_CHANGE_ENABLED.load(Ordering::SeqCst) {
        let _ = stdout.execute(DisableFocusChange);
        FOCUS_CHANGE_ENABLED.store(false, Ordering::SeqCst);
    }

    if MOUSE_CAPTURE_ENABLED.load(Ordering::SeqCst) {
        let _ = stdout.execute(DisableMouseCapture);
        MOUSE_CAPTURE_ENABLED.store(false, Ordering::SeqCst);
    }

    // Disable raw mode next
    if RAW_MODE_ENABLED.load(Ordering::SeqCst) {
        let _ = crossterm::terminal::disable_raw_mode();
        RAW_MODE_ENABLED.store(false, Ordering::SeqCst);
    }

    // Leave alternate screen last
    if ALTERNATE_SCREEN_ACTIVE.load(Ordering::SeqCst) {
        let _ = stdout.execute(LeaveAlternateScreen);
        ALTERNATE_SCREEN_ACTIVE.store(false, Ordering::SeqCst);
    }
}
