// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Set | Get | Session | Options | Inis | Version
//! ```
//!
//! Fatal environment errors (missing required value, out of memory) end
//! up here and terminate the process with a failure status.

use std::process::ExitCode;

use envblock::cli::global::GlobalOptions;
use envblock::cli::{self, Command};
use envblock::cmd::config::{run_inis_command, run_options_command};
use envblock::cmd::env::{run_get_command, run_set_command};
use envblock::cmd::session::run_session_command;
use envblock::config::Config;
use envblock::error::EnvError;
use envblock::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config)
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => cli.global.config_loader().map(|loader| {
            run_inis_command(&loader.format_loaded_files());
        }),
        Some(Command::Set(args)) => run_set_command(args, config),
        Some(Command::Get(args)) => run_get_command(args),
        Some(Command::Session(args)) => run_session_command(args),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<EnvError>().is_some_and(EnvError::is_fatal) => {
            eprintln!("fatal: {e:#}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> envblock::error::Result<Config> {
    global.config_loader()?.build()
}
