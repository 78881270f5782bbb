// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! NULL-terminated `envp` array for the exec family.
//!
//! ```text
//! strings:  [CString "A=1", CString "B=2"]
//! pointers: [ptr ------^,   ptr -----^,    NULL]
//!            ^
//!            as_ptr() -> *const *const c_char
//! ```

use std::ffi::{CString, c_char};

use super::block::EnvBlock;
use crate::error::{EnvError, EnvResult};

/// Owned C representation of an [`EnvBlock`].
///
/// The pointer array borrows from `strings`; both live and die together.
#[derive(Debug)]
pub struct ExecBlock {
    strings: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl ExecBlock {
    /// Builds the C strings and the NULL-terminated pointer array.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::InteriorNul` if an entry contains a NUL byte, or
    /// `EnvError::Allocation` if the pointer array cannot be reserved.
    pub fn new(block: &EnvBlock) -> EnvResult<Self> {
        let strings = block
            .iter()
            .map(|entry| {
                CString::new(entry).map_err(|_| EnvError::InteriorNul {
                    entry: entry.escape_default().to_string(),
                })
            })
            .collect::<EnvResult<Vec<_>>>()?;

        let mut pointers = Vec::new();
        pointers
            .try_reserve_exact(strings.len() + 1)
            .map_err(|_| EnvError::Allocation {
                what: "building exec environment",
            })?;
        pointers.extend(strings.iter().map(|s| s.as_ptr()));
        pointers.push(std::ptr::null());

        Ok(Self { strings, pointers })
    }

    /// Pointer suitable for the `envp` argument of `execve`.
    ///
    /// Valid for as long as `self` is alive.
    #[must_use]
    pub fn as_ptr(&self) -> *const *const c_char {
        self.pointers.as_ptr()
    }

    /// Number of entries, not counting the NULL sentinel.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    #[must_use]
    pub fn strings(&self) -> &[CString] {
        &self.strings
    }
}

impl TryFrom<&EnvBlock> for ExecBlock {
    type Error = EnvError;

    fn try_from(block: &EnvBlock) -> EnvResult<Self> {
        Self::new(block)
    }
}
