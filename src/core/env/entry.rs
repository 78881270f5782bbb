// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `KEY=VALUE` entry helpers.
//!
//! ```text
//! "PATH=/usr/bin:/bin"
//!  ^^^^ ^^^^^^^^^^^^^
//!  key  value (everything after the first '=')
//!
//! has_key("PATH")  matches the prefix "PATH="
//! ```

use crate::error::{EnvError, EnvResult};

/// Borrowed view over a single `KEY=VALUE` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvEntry<'a>(&'a str);

impl<'a> EnvEntry<'a> {
    #[must_use]
    pub const fn new(entry: &'a str) -> Self {
        Self(entry)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.0
    }

    /// Returns the key portion. An entry without `=` is all key.
    #[must_use]
    pub fn key(&self) -> &'a str {
        self.0.split_once('=').map_or(self.0, |(key, _)| key)
    }

    /// Returns the value portion, or `None` if the entry has no `=`.
    #[must_use]
    pub fn value(&self) -> Option<&'a str> {
        self.0.split_once('=').map(|(_, value)| value)
    }

    /// Returns true if the entry starts with `key=`.
    ///
    /// The comparison is byte-exact and case-sensitive, and includes the
    /// separator: `HOMEDIR=x` does not match `HOME`, neither does a bare `HOME`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.0
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with('='))
    }
}

/// Formats a new `key=value` entry.
///
/// # Errors
///
/// Returns `EnvError::Allocation` if the entry's storage cannot be reserved.
pub fn format_entry(key: &str, value: &str) -> EnvResult<String> {
    let mut entry = String::new();
    entry
        .try_reserve_exact(key.len() + 1 + value.len())
        .map_err(|_| EnvError::Allocation {
            what: "formatting entry",
        })?;
    entry.push_str(key);
    entry.push('=');
    entry.push_str(value);
    Ok(entry)
}

/// Splits a user-supplied `KEY=VALUE` assignment at the first `=`.
///
/// # Errors
///
/// Returns `EnvError::MalformedEntry` if there is no `=` or the key is empty.
pub fn parse_assignment(text: &str) -> EnvResult<(&str, &str)> {
    match text.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(EnvError::MalformedEntry {
            entry: text.to_string(),
        }),
    }
}
