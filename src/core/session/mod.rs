// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exec interception session.
//!
//! ```text
//! parent env --from_env()--> Session --apply(child env)--> child env'
//!
//! INTERCEPT_LIBRARY             preload library     (required)
//! INTERCEPT_REPORT_COMMAND      reporter executable (required)
//! INTERCEPT_REPORT_DESTINATION  report directory    (required)
//! INTERCEPT_VERBOSE             flag, presence only
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::core::env::block::EnvBlock;
use crate::error::EnvResult;

pub const KEY_LIBRARY: &str = "INTERCEPT_LIBRARY";
pub const KEY_REPORTER: &str = "INTERCEPT_REPORT_COMMAND";
pub const KEY_DESTINATION: &str = "INTERCEPT_REPORT_DESTINATION";
pub const KEY_VERBOSE: &str = "INTERCEPT_VERBOSE";

/// Session variables that must survive into every child environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    library: Option<String>,
    reporter: Option<String>,
    destination: Option<String>,
    verbose: bool,
}

impl Session {
    /// Captures the session from an environment array.
    #[must_use]
    pub fn from_env(env: &EnvBlock) -> Self {
        Self {
            library: env.get(KEY_LIBRARY).map(str::to_owned),
            reporter: env.get(KEY_REPORTER).map(str::to_owned),
            destination: env.get(KEY_DESTINATION).map(str::to_owned),
            verbose: env.contains_key(KEY_VERBOSE),
        }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.library.is_some() && self.reporter.is_some() && self.destination.is_some()
    }

    #[must_use]
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    #[must_use]
    pub fn reporter(&self) -> Option<&str> {
        self.reporter.as_deref()
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Upserts the session variables into `env`.
    ///
    /// # Errors
    ///
    /// Fails fatally with `EnvError::MissingValue` naming the first absent
    /// required variable, or with `EnvError::Allocation`.
    pub fn apply(&self, env: EnvBlock) -> EnvResult<EnvBlock> {
        debug!(valid = self.is_valid(), "applying session to environment");
        let env = env
            .upsert(KEY_LIBRARY, self.library())?
            .upsert(KEY_REPORTER, self.reporter())?
            .upsert(KEY_DESTINATION, self.destination())?;

        if self.verbose {
            self.write_message("session propagated to child environment");
            env.upsert(KEY_VERBOSE, Some("1"))
        } else {
            Ok(env)
        }
    }

    /// Emits a diagnostic, but only for verbose sessions.
    pub fn write_message(&self, message: &str) {
        if self.verbose {
            info!(target: "envblock::session", "{message}");
        }
    }

    /// Formats the session for display, one aligned `key = value` per line.
    #[must_use]
    pub fn format_lines(&self) -> Vec<String> {
        let rows = [
            (KEY_LIBRARY, self.library().unwrap_or("<unset>")),
            (KEY_REPORTER, self.reporter().unwrap_or("<unset>")),
            (KEY_DESTINATION, self.destination().unwrap_or("<unset>")),
            (KEY_VERBOSE, if self.verbose { "yes" } else { "no" }),
        ];
        let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        rows.iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}
