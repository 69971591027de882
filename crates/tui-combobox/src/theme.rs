// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared theme definition and loading helpers.
//!
//! The theme maps the widget's semantic color roles to concrete Ratatui
//! colors. Views receive a `Theme` instance resolved once by the host so no
//! module invents ad-hoc colors.

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders},
};
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Errors while loading or parsing custom theme definitions.
#[derive(Debug, Error)]
pub enum ThemeLoadError {
    #[error("failed to read theme file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse theme file {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid color for field '{field}': {details}")]
    InvalidColor { field: String, details: String },
}

/// Semantic color roles used by the selector widget.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(20, 20, 30),
            surface: Color::Rgb(30, 30, 45),
            text: Color::Rgb(205, 214, 244),
            muted: Color::Rgb(127, 132, 156),
            primary: Color::Rgb(137, 180, 250),
            accent: Color::Rgb(150, 190, 150),
            border: Color::Rgb(69, 71, 90),
            border_focused: Color::Rgb(137, 180, 250),
        }
    }
}

impl Theme {
    /// Load the default palette with overrides from an external TOML file
    /// merged on top.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ThemeLoadError> {
        Self::default().merge_overrides_from_file(path)
    }

    /// Merge overrides from an external TOML file on top of this theme.
    pub fn merge_overrides_from_file<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<Self, ThemeLoadError> {
        let path_ref = path.as_ref();
        let raw = fs::read_to_string(path_ref).map_err(|source| ThemeLoadError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        let overrides: ThemeOverrides =
            toml::from_str(&raw).map_err(|source| ThemeLoadError::ParseToml {
                path: path_ref.display().to_string(),
                source,
            })?;
        self.apply_overrides(overrides)
    }

    fn apply_overrides(self, overrides: ThemeOverrides) -> Result<Self, ThemeLoadError> {
        let mut theme = self;
        let apply = |target: &mut Color,
                     value: Option<ColorValue>,
                     field: &str|
         -> Result<(), ThemeLoadError> {
            if let Some(v) = value {
                *target = parse_color(v, field)?;
            }
            Ok(())
        };

        apply(&mut theme.bg, overrides.base, "base")?;
        apply(&mut theme.surface, overrides.surface, "surface")?;
        apply(&mut theme.text, overrides.text, "text")?;
        apply(&mut theme.muted, overrides.muted, "muted")?;
        apply(&mut theme.primary, overrides.primary, "primary")?;
        apply(&mut theme.accent, overrides.accent, "accent")?;
        apply(&mut theme.border, overrides.border, "border")?;
        apply(
            &mut theme.border_focused,
            overrides.border_focused,
            "border-focused",
        )?;

        Ok(theme)
    }

    /// Bordered block for the text field; the border tracks focus.
    pub fn field_block(&self, focused: bool) -> Block<'static> {
        let border = if focused { self.border_focused } else { self.border };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.bg))
    }

    /// Style for plain text elements
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for muted elements (group headers, placeholder text)
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for the highlighted menu row
    pub fn focused_style(&self) -> Style {
        Style::default().fg(self.bg).bg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Style for the create-entry row
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ThemeOverrides {
    base: Option<ColorValue>,
    surface: Option<ColorValue>,
    text: Option<ColorValue>,
    muted: Option<ColorValue>,
    primary: Option<ColorValue>,
    accent: Option<ColorValue>,
    border: Option<ColorValue>,
    border_focused: Option<ColorValue>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
enum ColorValue {
    Hex(String),
    Rgb { r: u8, g: u8, b: u8 },
    Array(Vec<u8>),
}

fn parse_color(value: ColorValue, field: &str) -> Result<Color, ThemeLoadError> {
    match value {
        ColorValue::Hex(s) => parse_hex(&s, field),
        ColorValue::Rgb { r, g, b } => Ok(Color::Rgb(r, g, b)),
        ColorValue::Array(vals) => {
            if vals.len() == 3 {
                Ok(Color::Rgb(vals[0], vals[1], vals[2]))
            } else {
                Err(ThemeLoadError::InvalidColor {
                    field: field.to_string(),
                    details: format!("expected [r,g,b], got length {}", vals.len()),
                })
            }
        }
    }
}

fn parse_hex(hex: &str, field: &str) -> Result<Color, ThemeLoadError> {
    let cleaned = hex.trim_start_matches('#');
    if cleaned.len() != 6 {
        return Err(ThemeLoadError::InvalidColor {
            field: field.to_string(),
            details: format!("hex color must be 6 characters, got {}", cleaned.len()),
        });
    }
    let component = |range: std::ops::Range<usize>,
                     name: &str|
     -> Result<u8, ThemeLoadError> {
        u8::from_str_radix(&cleaned[range], 16).map_err(|e| ThemeLoadError::InvalidColor {
            field: field.to_string(),
            details: format!("invalid {name} component: {e}"),
        })
    };
    Ok(Color::Rgb(
        component(0..2, "red")?,
        component(2..4, "green")?,
        component(4..6, "blue")?,
    ))
}
