// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Run a small form with two selector widgets and a live status line.
//!
//! The status line shows exactly what each widget signaled to the form, so
//! the difference between typing free text and committing a value stays
//! visible. Tab moves between fields while the menus are closed; inside an
//! open menu Tab picks the highlighted row. Ctrl-C (or Esc with the menus
//! closed) quits.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tui_combobox::{
    ComboBoxConfig, ComboBoxViewModel, ComboKeyResult, ComboMouseAction, FormValueSink,
    HitTestRegistry, OptionsModel, Theme, render_combo_box, terminal,
};

#[derive(Debug, Parser)]
struct Args {
    /// Theme overrides file (TOML)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Widget configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append tracing output to this file (stderr would corrupt the screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The surrounding form: one committed value slot per field, written only
/// through the [`FormValueSink`] each widget signals on commit.
struct FormState {
    values: Mutex<Vec<Option<String>>>,
}

impl FormState {
    fn new(field_count: usize) -> Self {
        Self {
            values: Mutex::new(vec![None; field_count]),
        }
    }

    fn snapshot(&self) -> Vec<Option<String>> {
        self.values.lock().expect("form state poisoned").clone()
    }
}

struct FieldSink {
    form: Arc<FormState>,
    field: usize,
}

impl FormValueSink for FieldSink {
    fn set_value(&self, value: Option<String>) {
        self.form.values.lock().expect("form state poisoned")[self.field] = value;
    }
}

struct FormField {
    label: &'static str,
    vm: ComboBoxViewModel,
    registry: HitTestRegistry<ComboMouseAction>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let theme = match &args.theme {
        Some(path) => Theme::load(path).with_context(|| format!("loading theme {}", path.display()))?,
        None => Theme::default(),
    };
    let config = match &args.config {
        Some(path) => ComboBoxConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ComboBoxConfig::default(),
    };

    terminal::setup_terminal()?;
    let result = run(theme, config);
    terminal::cleanup_terminal();
    result
}

fn run(theme: Theme, config: ComboBoxConfig) -> anyhow::Result<()> {
    let mut term = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let form = Arc::new(FormState::new(2));
    let mut fields = [
        FormField {
            label: "Team",
            vm: ComboBoxViewModel::with_config(team_model(), config.clone()),
            registry: HitTestRegistry::new(),
        },
        FormField {
            label: "Priority",
            vm: ComboBoxViewModel::with_config(priority_model(), config),
            registry: HitTestRegistry::new(),
        },
    ];
    for (index, field) in fields.iter_mut().enumerate() {
        field.vm.bind_form(Arc::new(FieldSink {
            form: Arc::clone(&form),
            field: index,
        }));
    }

    let mut focused = 0;
    fields[focused].vm.handle_focus_gained();

    loop {
        if fields.iter().any(|field| field.vm.needs_redraw) {
            draw(&mut term, &mut fields, focused, &theme, &form)?;
            for field in &mut fields {
                field.vm.needs_redraw = false;
            }
        }

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    match fields[focused].vm.handle_key_event(&key) {
                        ComboKeyResult::Consumed { .. } => {}
                        ComboKeyResult::Ignored => match key.code {
                            // The widget lets Tab through while its menu is
                            // closed; the form uses it to move focus.
                            KeyCode::Tab => focused = move_focus(&mut fields, focused, 1),
                            KeyCode::BackTab => focused = move_focus(&mut fields, focused, -1),
                            KeyCode::Esc => break,
                            _ => {}
                        },
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        dispatch_press(&mut fields, &mut focused, mouse.column, mouse.row);
                    }
                }
                Event::FocusGained => fields[focused].vm.handle_focus_gained(),
                Event::FocusLost => fields[focused].vm.handle_focus_lost(Instant::now()),
                Event::Resize(_, _) => {
                    term.autoresize()?;
                    fields[focused].vm.needs_redraw = true;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        for field in &mut fields {
            field.vm.tick(now);
        }
    }

    Ok(())
}

fn move_focus(fields: &mut [FormField], focused: usize, direction: isize) -> usize {
    let len = fields.len() as isize;
    let next = (focused as isize + direction).rem_euclid(len) as usize;
    fields[focused].vm.handle_focus_lost(Instant::now());
    fields[next].vm.handle_focus_gained();
    next
}

/// Resolve a press against the per-field registries, the focused field
/// first because its menu draws on top. A miss everywhere is an outside
/// press and closes every menu.
fn dispatch_press(fields: &mut [FormField], focused: &mut usize, column: u16, row: u16) {
    let mut order: Vec<usize> = (0..fields.len()).collect();
    order.sort_by_key(|index| *index != *focused);

    let hit = order.into_iter().find_map(|index| {
        fields[index].registry.hit_test(column, row).copied().map(|action| (index, action))
    });

    match hit {
        Some((index, action)) => {
            if index != *focused {
                fields[*focused].vm.handle_focus_lost(Instant::now());
                fields[index].vm.handle_focus_gained();
                *focused = index;
            }
            fields[index].vm.perform_mouse_action(action);
        }
        None => {
            for field in fields.iter_mut() {
                field.vm.handle_press_outside();
            }
        }
    }
}

fn draw(
    term: &mut Terminal<CrosstermBackend<io::Stdout>>,
    fields: &mut [FormField],
    focused: usize,
    theme: &Theme,
    form: &FormState,
) -> anyhow::Result<()> {
    term.draw(|frame| {
        let [title, _, label_a, field_a, _, label_b, field_b, _, status, footer] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from("New task")).style(theme.text_style()),
            title,
        );
        frame.render_widget(
            Paragraph::new(Line::from(fields[0].label)).style(theme.muted_style()),
            label_a,
        );
        frame.render_widget(
            Paragraph::new(Line::from(fields[1].label)).style(theme.muted_style()),
            label_b,
        );

        let values = form.snapshot();
        let status_text: Vec<String> = fields
            .iter()
            .zip(&values)
            .map(|(field, value)| {
                format!("{}: {}", field.label, value.as_deref().unwrap_or("(unset)"))
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(status_text.join("   "))).style(theme.text_style()),
            status,
        );
        frame.render_widget(
            Paragraph::new(Line::from(
                "Type to filter, Enter commits the text, Tab picks the highlight, Ctrl-C quits",
            ))
            .style(theme.muted_style()),
            footer,
        );

        // The focused widget renders last so its open menu draws on top of
        // the other field; hit testing probes the registries in the same
        // priority.
        let areas = [field_a, field_b];
        let mut order: Vec<usize> = (0..fields.len()).collect();
        order.sort_by_key(|index| *index == focused);
        for index in order {
            let field = &mut fields[index];
            field.registry.clear();
            render_combo_box(frame, pad_field(areas[index]), &field.vm, theme, &mut field.registry);
        }
    })?;
    Ok(())
}

fn pad_field(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y,
        width: area.width.min(48),
        height: area.height,
    }
}

fn team_model() -> OptionsModel {
    OptionsModel::builder()
        .option("unassigned", "Unassigned")
        .group(
            "Engineering",
            [
                ("backend", "Backend"),
                ("frontend", "Frontend"),
                ("platform", "Platform"),
            ],
        )
        .group("Design", [("ux", "UX"), ("visual", "Visual Design")])
        .build()
}

fn priority_model() -> OptionsModel {
    OptionsModel::builder()
        .option("p0", "Critical")
        .option("p1", "High")
        .option("p2", "Normal")
        .option("p3", "Low")
        .build()
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = tracing_subscriber::fmt::layer().with_writer(Arc::new(file)).with_ansi(false);
    tracing_subscriber::registry().with(filter).with(layer).try_init()?;
    Ok(())
}
