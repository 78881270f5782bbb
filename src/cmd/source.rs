// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Base array loading and output rendering shared by the commands.

use tracing::debug;

use crate::cli::env::SourceArgs;
use crate::config::types::OutputFormat;
use crate::core::env::block::EnvBlock;
use crate::error::{ConfigError, EnvBlockResult, Result};

/// Loads the base environment array selected by `source`.
///
/// # Errors
///
/// Returns `ConfigError::ReadError` if the `--from` file cannot be read.
pub fn load_base(source: &SourceArgs) -> EnvBlockResult<EnvBlock> {
    let block = if source.empty {
        EnvBlock::new()
    } else if let Some(path) = &source.from {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        EnvBlock::parse(&text)
    } else {
        EnvBlock::current()
    };

    debug!(entries = block.len(), "loaded base environment");
    Ok(block)
}

/// Renders an array in the given format, ready to be written to stdout.
///
/// # Errors
///
/// Returns an error if an entry contains a newline in `lines` format (it
/// would read back as several entries), or if JSON serialization fails.
pub fn render(block: &EnvBlock, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Lines => {
            let mut out = String::new();
            for entry in block.iter() {
                if entry.contains('\n') {
                    anyhow::bail!(
                        "entry '{}' contains a newline and cannot be written one per line; \
                         use --format null or --format json",
                        entry.escape_default()
                    );
                }
                out.push_str(entry);
                out.push('\n');
            }
            out
        }
        OutputFormat::Null => block.to_nul_separated(),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(block.entries())?;
            out.push('\n');
            out
        }
    };
    Ok(out)
}
