// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::block::EnvBlock;
use super::entry::{EnvEntry, format_entry, parse_assignment};
use super::exec::ExecBlock;
use super::{current_env, upsert};
use crate::error::EnvError;
use std::ffi::CStr;

fn block(entries: &[&str]) -> EnvBlock {
    entries.iter().copied().collect()
}

#[test]
fn test_upsert_appends_absent_key() {
    let envs = block(&["PATH=/bin", "HOME=/root"]);
    let envs = upsert(envs, "FOO", Some("bar")).unwrap();
    assert_eq!(envs.entries(), ["PATH=/bin", "HOME=/root", "FOO=bar"]);
}

#[test]
fn test_upsert_replaces_existing_key() {
    let envs = block(&["PATH=/bin", "HOME=/root"]);
    let envs = upsert(envs, "HOME", Some("/home/x")).unwrap();
    assert_eq!(envs.entries(), ["PATH=/bin", "HOME=/home/x"]);
}

#[test]
fn test_upsert_moves_replaced_entry_to_end() {
    let envs = block(&["A=1", "B=2", "C=3"]);
    let envs = upsert(envs, "A", Some("9")).unwrap();
    assert_eq!(envs.entries(), ["B=2", "C=3", "A=9"]);
}

#[test]
fn test_upsert_removes_all_duplicates() {
    let envs = block(&["K=1", "X=x", "K=2", "Y=y", "K=3"]);
    let envs = upsert(envs, "K", Some("new")).unwrap();
    assert_eq!(envs.entries(), ["X=x", "Y=y", "K=new"]);
}

#[test]
fn test_upsert_into_empty() {
    let envs = upsert(EnvBlock::new(), "FOO", Some("bar")).unwrap();
    assert_eq!(envs.entries(), ["FOO=bar"]);
}

#[test]
fn test_upsert_is_idempotent() {
    let envs = block(&["PATH=/bin", "HOME=/root", "HOME=/tmp"]);
    let once = envs.clone().upsert("HOME", Some("/home/x")).unwrap();
    let twice = once.clone().upsert("HOME", Some("/home/x")).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_upsert_missing_value_is_fatal() {
    let envs = block(&["PATH=/bin"]);
    let err = upsert(envs, "INTERCEPT_LIBRARY", None).unwrap_err();
    assert_eq!(
        err,
        EnvError::MissingValue {
            key: "INTERCEPT_LIBRARY".to_string()
        }
    );
    assert!(err.is_fatal());
}

#[test]
fn test_upsert_matches_whole_key_only() {
    let envs = block(&["HOMEDIR=/d", "HOME", "home=/lower", "HOME=/root"]);
    let envs = upsert(envs, "HOME", Some("/x")).unwrap();
    assert_eq!(envs.entries(), ["HOMEDIR=/d", "HOME", "home=/lower", "HOME=/x"]);
}

#[test]
fn test_upsert_empty_value() {
    let envs = upsert(block(&["EMPTY=full"]), "EMPTY", Some("")).unwrap();
    assert_eq!(envs.entries(), ["EMPTY="]);
    assert_eq!(envs.get("EMPTY"), Some(""));
}

#[test]
fn test_set_in_place() {
    let mut envs = block(&["A=1"]);
    envs.set("B", "2").unwrap().set("A", "3").unwrap();
    assert_eq!(envs.entries(), ["B=2", "A=3"]);
}

#[test]
fn test_remove_matching_and_append() {
    let mut envs = block(&["A=1", "B=2", "A=3"]);
    assert_eq!(envs.remove_matching("A"), 2);
    assert_eq!(envs.remove_matching("A"), 0);
    envs.append("C=4".to_string()).unwrap();
    assert_eq!(envs.entries(), ["B=2", "C=4"]);
}

#[test]
fn test_get_returns_first_match() {
    let envs = block(&["A=first", "A=second", "EQ=a=b"]);
    assert_eq!(envs.get("A"), Some("first"));
    assert_eq!(envs.get("EQ"), Some("a=b"));
    assert_eq!(envs.get("MISSING"), None);
    assert!(envs.contains_key("EQ"));
    assert!(!envs.contains_key("E"));
}

#[test]
fn test_entry_parts() {
    let entry = EnvEntry::new("KEY=a=b");
    assert_eq!(entry.key(), "KEY");
    assert_eq!(entry.value(), Some("a=b"));
    assert!(entry.has_key("KEY"));
    assert!(!entry.has_key("KE"));

    let bare = EnvEntry::new("BARE");
    assert_eq!(bare.key(), "BARE");
    assert_eq!(bare.value(), None);
    assert!(!bare.has_key("BARE"));
}

#[test]
fn test_format_entry() {
    assert_eq!(format_entry("FOO", "bar").unwrap(), "FOO=bar");
    assert_eq!(format_entry("FOO", "").unwrap(), "FOO=");
}

#[test]
fn test_parse_assignment() {
    assert_eq!(parse_assignment("A=b=c").unwrap(), ("A", "b=c"));
    assert_eq!(parse_assignment("A=").unwrap(), ("A", ""));
    assert!(matches!(
        parse_assignment("NOEQUALS"),
        Err(EnvError::MalformedEntry { .. })
    ));
    assert!(matches!(
        parse_assignment("=value"),
        Err(EnvError::MalformedEntry { .. })
    ));
}

#[test]
fn test_parse_lines_and_nul() {
    let lines = EnvBlock::parse("A=1\nB=2\n\nC=3\n");
    assert_eq!(lines.entries(), ["A=1", "B=2", "C=3"]);

    let nul = EnvBlock::parse("A=1\0MULTI=x\ny\0");
    assert_eq!(nul.entries(), ["A=1", "MULTI=x\ny"]);
}

#[test]
fn test_to_nul_separated() {
    let envs = block(&["A=1", "B=2"]);
    assert_eq!(envs.to_nul_separated(), "A=1\0B=2\0");
    assert_eq!(EnvBlock::parse(&envs.to_nul_separated()), envs);
    assert_eq!(EnvBlock::new().to_nul_separated(), "");
}

#[test]
fn test_exec_block_is_null_terminated() {
    let envs = block(&["A=1", "B=2"]);
    let exec = ExecBlock::new(&envs).unwrap();
    assert_eq!(exec.len(), 2);

    let mut seen = Vec::new();
    let mut cursor = exec.as_ptr();
    // SAFETY: the array is NULL-terminated and every pointer targets a
    // CString owned by `exec`, which outlives this loop.
    unsafe {
        while !(*cursor).is_null() {
            seen.push(CStr::from_ptr(*cursor).to_str().unwrap().to_string());
            cursor = cursor.add(1);
        }
    }
    assert_eq!(seen, ["A=1", "B=2"]);
}

#[test]
fn test_exec_block_empty() {
    let exec = ExecBlock::try_from(&EnvBlock::new()).unwrap();
    assert!(exec.is_empty());
    // SAFETY: an empty block still holds the sentinel.
    assert!(unsafe { (*exec.as_ptr()).is_null() });
}

#[test]
fn test_exec_block_rejects_interior_nul() {
    let envs: EnvBlock = vec!["BAD=a\0b".to_string()].into();
    let err = ExecBlock::new(&envs).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r"entry 'BAD=a\u{0}b' contains an interior NUL byte");
}

#[test]
fn test_current_env() {
    let env = current_env();
    assert!(
        env.get("PATH").is_some() || env.get("Path").is_some(),
        "PATH should exist in current environment"
    );
}
