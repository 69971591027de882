// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Widget-specific configuration types

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use thiserror::Error;

/// Errors while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Selector widget configuration. Every field is optional; absent fields
/// fall back to the defaults exposed by the accessor methods.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ComboBoxConfig {
    /// Grace window in milliseconds between losing focus and closing the
    /// menu, so an in-flight click on a row can still land
    pub close_grace_ms: Option<u64>,
    /// Maximum number of menu rows shown at once; longer lists scroll
    pub max_visible_rows: Option<usize>,
    /// Placeholder text shown while the field is empty
    pub placeholder: Option<String>,
}

impl ComboBoxConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path_ref = path.as_ref();
        let raw = fs::read_to_string(path_ref).map_err(|source| ConfigLoadError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigLoadError::ParseToml {
            path: path_ref.display().to_string(),
            source,
        })
    }

    pub fn close_grace(&self) -> Duration {
        self.close_grace_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::view_model::BLUR_CLOSE_GRACE)
    }

    pub fn max_visible_rows(&self) -> usize {
        self.max_visible_rows.unwrap_or(8)
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or("Type to search...")
    }
}
