// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `set` and `get` command implementations.
//!
//! ```text
//! set:  base --config set--> --copy NAME--> KEY=VALUE--> --session--> stdout
//!            (each step is an upsert; MissingValue aborts the run)
//! ```

use anyhow::anyhow;
use std::io::Write;
use tracing::debug;

use super::source::{load_base, render};
use crate::cli::env::{GetArgs, SetArgs};
use crate::config::Config;
use crate::core::env::block::EnvBlock;
use crate::core::env::entry::parse_assignment;
use crate::core::session::Session;
use crate::error::{EnvResult, Result};

/// Upserts `KEY=VALUE` assignments in order.
///
/// # Errors
///
/// Returns `EnvError::MalformedEntry` for an assignment without `=`, or a
/// fatal allocation error.
pub fn apply_assignments<'a, I>(mut block: EnvBlock, assignments: I) -> EnvResult<EnvBlock>
where
    I: IntoIterator<Item = &'a str>,
{
    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        block = block.upsert(key, Some(value))?;
    }
    Ok(block)
}

/// Copies each variable from the invoking process environment.
///
/// A name that is unset (or not valid Unicode) is the fatal missing-value case.
///
/// # Errors
///
/// Returns `EnvError::MissingValue` naming the first unset variable.
pub fn copy_from_process<'a, I>(mut block: EnvBlock, names: I) -> EnvResult<EnvBlock>
where
    I: IntoIterator<Item = &'a str>,
{
    for name in names {
        let value = std::env::var(name).ok();
        block = block.upsert(name, value.as_deref())?;
    }
    Ok(block)
}

/// Builds the array for `set` without printing it.
///
/// # Errors
///
/// Returns an error if the base array cannot be loaded or any upsert fails.
pub fn build_set_block(args: &SetArgs, config: &Config) -> Result<EnvBlock> {
    let mut block = load_base(&args.source)?;
    block = apply_assignments(block, config.set.iter().map(String::as_str))?;
    block = copy_from_process(block, args.copy.iter().map(String::as_str))?;
    block = apply_assignments(block, args.assignments.iter().map(String::as_str))?;

    if args.session {
        let session = Session::from_env(&EnvBlock::current());
        block = session.apply(block)?;
    }

    debug!(entries = block.len(), "environment prepared");
    Ok(block)
}

/// Main handler for the `set` command.
///
/// # Errors
///
/// Returns an error if building the array fails or stdout cannot be written.
pub fn run_set_command(args: &SetArgs, config: &Config) -> Result<()> {
    let block = build_set_block(args, config)?;
    let format = args.format.unwrap_or(config.output.format);
    let out = render(&block, format)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Main handler for the `get` command.
///
/// # Errors
///
/// Returns an error if the base array cannot be loaded or the key is unset.
pub fn run_get_command(args: &GetArgs) -> Result<()> {
    let block = load_base(&args.source)?;
    match block.get(&args.key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(anyhow!("'{}' is not set", args.key)),
    }
}
