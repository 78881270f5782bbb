// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session command implementation.

use super::source::load_base;
use crate::cli::env::SessionArgs;
use crate::core::session::Session;
use crate::error::Result;

/// Main handler for the `session` command.
///
/// # Errors
///
/// Returns an error if the base array cannot be loaded.
pub fn run_session_command(args: &SessionArgs) -> Result<()> {
    let session = Session::from_env(&load_base(&args.source)?);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        for line in session.format_lines() {
            println!("{line}");
        }
    }
    if !session.is_valid() {
        tracing::warn!("session is incomplete, `set --session` would fail");
    }
    Ok(())
}
