// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordered environment array and the upsert operation.
//!
//! # Architecture
//!
//! ```text
//! EnvBlock (Vec<String>, insertion order kept)
//!
//! upsert(block, key, Some(value))
//!   format_entry(key, value)    -- "key=value", fatal on OOM
//!   remove_matching(key)        -- one retain() pass over "key=" prefixes
//!   append(entry)               -- push at the end, fatal on OOM
//!
//! upsert(block, key, None)      -- fatal MissingValue
//! ```

use super::entry::{EnvEntry, format_entry};
use crate::error::{EnvError, EnvResult};
use tracing::{Level, enabled, trace, warn};

/// An ordered array of `KEY=VALUE` entries describing a process environment.
///
/// Unlike a map, duplicate keys and entries without `=` are preserved as
/// given; only [`EnvBlock::upsert`] and [`EnvBlock::remove_matching`] collapse
/// entries for a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvBlock {
    entries: Vec<String>,
}

impl EnvBlock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Captures the current process environment in the order the OS reports it.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn current() -> Self {
        let mut entries = Vec::new();
        for (key, value) in std::env::vars_os() {
            if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
                entries.push(format!("{key}={value}"));
            } else {
                warn!(key = %key.to_string_lossy(), "skipping non-Unicode environment variable");
            }
        }
        Self { entries }
    }

    /// Parses a serialized array.
    ///
    /// Text containing NUL bytes is split on NUL (the `env -0` shape),
    /// anything else is read one entry per line. Empty records are dropped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let entries = if text.contains('\0') {
            text.split('\0')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        } else {
            text.lines()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        };
        Self { entries }
    }

    /// Replaces every entry for `key` with a single trailing `key=value`.
    ///
    /// Consumes the array; the returned array supersedes it.
    ///
    /// # Errors
    ///
    /// Both errors are fatal:
    /// - `EnvError::MissingValue` if `value` is `None`.
    /// - `EnvError::Allocation` if the entry or the array cannot grow.
    pub fn upsert(mut self, key: &str, value: Option<&str>) -> EnvResult<Self> {
        let Some(value) = value else {
            return Err(EnvError::MissingValue {
                key: key.to_string(),
            });
        };

        let entry = format_entry(key, value)?;
        let removed = self.remove_matching(key);
        if enabled!(Level::TRACE) {
            trace!(key, value, removed, "upserting env entry");
        }
        self.append(entry)?;
        Ok(self)
    }

    /// In-place variant of [`EnvBlock::upsert`] for a value known to exist.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Allocation` if the entry or the array cannot grow.
    pub fn set(&mut self, key: &str, value: &str) -> EnvResult<&mut Self> {
        let block = std::mem::take(self);
        *self = block.upsert(key, Some(value))?;
        Ok(self)
    }

    /// Removes every entry starting with `key=`, keeping the order of the rest.
    ///
    /// Returns the number of removed entries.
    pub fn remove_matching(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !EnvEntry::new(entry).has_key(key));
        before - self.entries.len()
    }

    /// Appends an entry at the end of the array.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Allocation` if the array cannot grow.
    pub fn append(&mut self, entry: String) -> EnvResult<()> {
        self.entries
            .try_reserve(1)
            .map_err(|_| EnvError::Allocation {
                what: "growing environment array",
            })?;
        self.entries.push(entry);
        Ok(())
    }

    /// Returns the value of the first entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .map(|entry| EnvEntry::new(entry))
            .find(|entry| entry.has_key(key))
            .and_then(|entry| entry.value())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| EnvEntry::new(entry).has_key(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes as `KEY=VALUE\0KEY=VALUE\0`.
    #[must_use]
    pub fn to_nul_separated(&self) -> String {
        let mut out = String::with_capacity(self.entries.iter().map(|e| e.len() + 1).sum());
        for entry in self {
            out.push_str(entry);
            out.push('\0');
        }
        out
    }
}

impl From<Vec<String>> for EnvBlock {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a EnvBlock {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for EnvBlock {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}
