// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for environment preparation.
//!
//! ```text
//!            core
//!             |
//!       +-----+------+
//!       v            v
//!      env        session
//!       |            |
//!   EnvBlock    INTERCEPT_* keys
//!   upsert      from_env / apply
//!   ExecBlock
//! ```

pub mod env;
pub mod session;
