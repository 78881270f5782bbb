// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!      EnvBlockError (~16 bytes)
//!              |
//!      +-------+-------+
//!      |       |       |
//!      v       v       v
//!     Env    Config    Io
//!     Box     Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Env     MissingValue, Allocation (fatal), InteriorNul, MalformedEntry
//!   Config  ReadError, InvalidValue
//! ```
//!
//! The two fatal env errors are never handled locally: they travel to
//! `main`, which prints the diagnostic and exits with a failure status.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvBlockError`].
pub type EnvBlockResult<T> = std::result::Result<T, EnvBlockError>;

/// Result type for environment array operations.
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum EnvBlockError {
    /// Environment array operation failed.
    #[error("env error: {0}")]
    Env(#[from] Box<EnvError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvBlockError {
                fn from(err: $error) -> Self {
                    EnvBlockError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    EnvError => Env,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Env Errors ---

/// Environment array errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required value was absent (the `getenv` lookup failed).
    #[error("required value for '{key}' is missing")]
    MissingValue { key: String },

    /// Memory for a new entry or for array growth could not be reserved.
    #[error("out of memory while {what}")]
    Allocation { what: &'static str },

    /// Entry cannot be passed to exec because it contains a NUL byte.
    #[error("entry '{entry}' contains an interior NUL byte")]
    InteriorNul { entry: String },

    /// Assignment is not of the form `KEY=VALUE`.
    #[error("malformed entry '{entry}': expected KEY=VALUE")]
    MalformedEntry { entry: String },
}

impl EnvError {
    /// Returns true for errors after which environment setup cannot continue.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingValue { .. } | Self::Allocation { .. })
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration or input file.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
