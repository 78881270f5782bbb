// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the environment commands.

use clap::Args;
use std::path::PathBuf;

use crate::config::types::OutputFormat;

/// Where the base environment array comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Starts from an empty array instead of the current environment.
    #[arg(short = 'e', long, conflicts_with = "from")]
    pub empty: bool,

    /// Reads the base array from a file, NUL-separated or one entry per line.
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
}

/// Arguments for `set`.
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Copies NAME from the invoking environment; fails if NAME is unset.
    /// Can be specified multiple times.
    #[arg(long = "copy", value_name = "NAME", action = clap::ArgAction::Append)]
    pub copy: Vec<String>,

    /// Propagates the INTERCEPT_* session of the invoking environment.
    #[arg(long)]
    pub session: bool,

    /// Output format, overrides `output.format`.
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Assignments applied in order.
    #[arg(value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

/// Arguments for `get`.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Variable name.
    pub key: String,
}

/// Arguments for `session`.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Prints the session as JSON.
    #[arg(long)]
    pub json: bool,
}
