// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   set, get, session, options, inis
//! ```

pub mod config;
pub mod env;
pub mod session;
pub mod source;

#[cfg(test)]
mod tests;
