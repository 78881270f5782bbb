// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envblock.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local envblock.toml (cwd)
//! 3. --config FILE (repeatable)
//! 4. ENVBLOCK_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVBLOCK_GLOBAL__LOG_LEVEL=4  → global.log_level = 4
//! ENVBLOCK_OUTPUT__FORMAT=json  → output.format = "json"
//! ```
//!
//! # Default Assignments
//!
//! ```toml
//! # upserted in order, before command-line assignments
//! set = ["LANG=C.UTF-8", "TZ=UTC"]
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::env::entry::parse_assignment;
use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, OutputConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Output options.
    pub output: OutputConfig,
    /// `KEY=VALUE` assignments applied to every `set` invocation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<String>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envblock::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("config/default.toml")
    ///     .add_toml_file_optional("envblock.toml")
    ///     .with_env_prefix("ENVBLOCK")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a `set` entry that is not
    /// `KEY=VALUE`.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (index, assignment) in self.set.iter().enumerate() {
            parse_assignment(assignment).map_err(|e| ConfigError::InvalidValue {
                section: "root".to_string(),
                key: format!("set[{index}]"),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Format configuration options for display, deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.log_level".to_string(),
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(|| "<none>".to_string(), |p| p.display().to_string()),
        );
        options.insert("output.format".to_string(), self.output.format.to_string());
        for (index, assignment) in self.set.iter().enumerate() {
            options.insert(format!("set[{index}]"), assignment.clone());
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
