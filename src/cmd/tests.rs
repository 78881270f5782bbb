// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::env::{apply_assignments, build_set_block, copy_from_process};
use super::source::{load_base, render};
use crate::cli::env::{SetArgs, SourceArgs};
use crate::config::Config;
use crate::config::types::OutputFormat;
use crate::core::env::block::EnvBlock;
use crate::error::EnvError;
use std::io::Write;

fn empty_source() -> SourceArgs {
    SourceArgs {
        empty: true,
        from: None,
    }
}

fn set_args(assignments: &[&str]) -> SetArgs {
    SetArgs {
        source: empty_source(),
        copy: Vec::new(),
        session: false,
        format: None,
        assignments: assignments.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn test_apply_assignments_in_order() {
    let block: EnvBlock = ["A=1", "B=2"].into_iter().collect();
    let block = apply_assignments(block, ["A=3", "C=x=y", "A=4"]).unwrap();
    assert_eq!(block.entries(), ["B=2", "C=x=y", "A=4"]);
}

#[test]
fn test_apply_assignments_rejects_malformed() {
    let err = apply_assignments(EnvBlock::new(), ["GOOD=1", "BAD"]).unwrap_err();
    assert_eq!(
        err,
        EnvError::MalformedEntry {
            entry: "BAD".to_string()
        }
    );
}

#[test]
fn test_copy_from_process_missing_is_fatal() {
    let err = copy_from_process(EnvBlock::new(), ["ENVBLOCK_TEST_SURELY_UNSET_VARIABLE"])
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, EnvError::MissingValue { ref key } if key == "ENVBLOCK_TEST_SURELY_UNSET_VARIABLE"));
}

#[test]
fn test_copy_from_process_copies_value() {
    let expected = std::env::var("PATH").unwrap();
    let block = copy_from_process(EnvBlock::new(), ["PATH"]).unwrap();
    assert_eq!(block.get("PATH"), Some(expected.as_str()));
}

#[test]
fn test_build_set_block_config_before_cli() {
    let config = Config::parse(r#"set = ["LANG=C", "TZ=UTC"]"#).unwrap();
    let block = build_set_block(&set_args(&["LANG=en_US.UTF-8"]), &config).unwrap();
    assert_eq!(block.entries(), ["TZ=UTC", "LANG=en_US.UTF-8"]);
}

#[test]
fn test_load_base_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"A=1\0B=line\nbreak\0").unwrap();

    let source = SourceArgs {
        empty: false,
        from: Some(file.path().to_path_buf()),
    };
    let block = load_base(&source).unwrap();
    assert_eq!(block.entries(), ["A=1", "B=line\nbreak"]);
}

#[test]
fn test_load_base_missing_file() {
    let source = SourceArgs {
        empty: false,
        from: Some("/definitely/not/here/env.txt".into()),
    };
    let err = load_base(&source).unwrap_err();
    assert!(err.to_string().starts_with("config error: failed to read '/definitely/not/here/env.txt'"));
}

#[test]
fn test_render_formats() {
    let block: EnvBlock = ["A=1", "B=two words"].into_iter().collect();

    assert_eq!(render(&block, OutputFormat::Lines).unwrap(), "A=1\nB=two words\n");
    assert_eq!(render(&block, OutputFormat::Null).unwrap(), "A=1\0B=two words\0");
    insta::assert_snapshot!(render(&block, OutputFormat::Json).unwrap().trim_end(), @r#"
    [
      "A=1",
      "B=two words"
    ]
    "#);
    assert_eq!(render(&EnvBlock::new(), OutputFormat::Lines).unwrap(), "");
}

#[test]
fn test_render_lines_rejects_embedded_newline() {
    let block: EnvBlock = ["A=x\nB=evil", "C=3"].into_iter().collect();

    let err = render(&block, OutputFormat::Lines).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"entry 'A=x\\nB=evil' contains a newline and cannot be written one per line; use --format null or --format json"
    );

    let nul = render(&block, OutputFormat::Null).unwrap();
    assert_eq!(EnvBlock::parse(&nul), block);
}
