// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("envblock.toml")
//!   .add_toml_file(--config)
//!   .with_env_prefix("ENVBLOCK")
//!   .set(key, value)
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use super::Config;
use crate::error::Result;

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `{PREFIX}_{SECTION}__{KEY}` and `{PREFIX}_SET` variables at build time.
    ///
    /// Other variables sharing the prefix are ignored.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    /// - A `set` entry is not `KEY=VALUE`.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self
                .builder
                .add_source(env_layer(prefix, std::env::vars_os())),
            None => self.builder,
        };
        let cfg = builder.build()?;
        let config: Config = cfg.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

/// Config sections reachable through `{PREFIX}_{SECTION}__{KEY}`.
const ENV_SECTIONS: [&str; 2] = ["global", "output"];

/// Environment source over the config variables found in `vars`.
///
/// `{PREFIX}_SET` is split on `,` into the `set` array.
pub(crate) fn env_layer<I>(prefix: &str, vars: I) -> config::Environment
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    config::Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("set")
        .try_parsing(true)
        .source(Some(env_source(prefix, vars)))
}

/// Keeps only the variables that name a config key.
///
/// Matching is case-insensitive, like the `config` crate's own prefix check.
/// Non-Unicode variables are dropped.
fn env_source<I>(prefix: &str, vars: I) -> config::Map<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let prefix = format!("{}_", prefix.to_lowercase());
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter(|(key, _)| {
            key.to_lowercase()
                .strip_prefix(&prefix)
                .is_some_and(is_config_key)
        })
        .collect()
}

fn is_config_key(rest: &str) -> bool {
    rest == "set"
        || ENV_SECTIONS.iter().any(|section| {
            rest.strip_prefix(section)
                .and_then(|field| field.strip_prefix("__"))
                .is_some_and(|field| !field.is_empty())
        })
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
