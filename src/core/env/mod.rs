// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment array management.
//!
//! # Architecture
//!
//! ```text
//! EnvBlock (ordered Vec<String> of KEY=VALUE)
//! Sources: EnvBlock::current(), EnvBlock::parse(), EnvBlock::new()
//! Ops: upsert/set/remove_matching/append/get
//! Sink: ExecBlock (CString + NULL-terminated envp)
//! ```
//!
//! - **Case-sensitive keys**: `Path` and `PATH` are different entries
//! - **Order preserving**: untouched entries keep their relative order
//! - **Upserted entries go last**

pub mod block;
pub mod entry;
pub mod exec;

#[cfg(test)]
mod tests;

use crate::error::EnvResult;
use block::EnvBlock;

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> EnvBlock {
    EnvBlock::current()
}

/// Inserts or replaces `key` in `envs`, see [`EnvBlock::upsert`].
///
/// # Errors
///
/// Fails fatally when `value` is `None` or memory cannot be reserved.
///
/// # Example
///
/// ```
/// use envblock::core::env::{block::EnvBlock, upsert};
///
/// let envs = EnvBlock::from(vec!["PATH=/bin".to_string(), "HOME=/root".to_string()]);
/// let envs = upsert(envs, "HOME", Some("/home/x"))?;
/// assert_eq!(envs.entries(), ["PATH=/bin", "HOME=/home/x"]);
/// # Ok::<(), envblock::error::EnvError>(())
/// ```
pub fn upsert(envs: EnvBlock, key: &str, value: Option<&str>) -> EnvResult<EnvBlock> {
    envs.upsert(key, value)
}
