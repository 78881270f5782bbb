// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envblock using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envblock [global options] <command>
//! set [source] [--copy NAME]... [--session] [KEY=VALUE]...
//! get [source] KEY
//! session [source] [--json]
//! options
//! inis
//! version
//! ```

pub mod env;
pub mod global;


use crate::cli::env::{GetArgs, SessionArgs, SetArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Child process environment preparation.
#[derive(Debug, Parser)]
#[command(
    name = "envblock",
    author,
    version,
    about = "Prepare child process environment arrays",
    long_about = "envblock Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds the KEY=VALUE array a child process receives. Every\n\
                  assignment replaces all earlier entries for its key and is\n\
                  appended at the end; other entries keep their order.",
    after_help = "CONFIG FILES:\n\n\
                  envblock reads `envblock.toml` from the current directory if it\n\
                  exists, then every file given with --config, then ENVBLOCK_*\n\
                  environment variables (ENVBLOCK_OUTPUT__FORMAT=json)."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used.
    Inis,

    /// Applies assignments and prints the resulting environment array.
    Set(SetArgs),

    /// Prints the value of one variable.
    Get(GetArgs),

    /// Shows the interception session found in an environment.
    Session(SessionArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
