//! Tests for id, count, checksum, categories, completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_id() {
    match parse(&["rbxdl", "id", "https://www.roblox.com/catalog/998877/Hat"]) {
        CliCommand::Id { reference } => {
            assert_eq!(reference, "https://www.roblox.com/catalog/998877/Hat")
        }
        _ => panic!("expected Id"),
    }
}

#[test]
fn cli_parse_count() {
    match parse(&["rbxdl", "count"]) {
        CliCommand::Count { watch } => assert!(!watch),
        _ => panic!("expected Count"),
    }
    match parse(&["rbxdl", "count", "--watch"]) {
        CliCommand::Count { watch } => assert!(watch),
        _ => panic!("expected Count --watch"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["rbxdl", "checksum", "/tmp/Cool_Decal.png"]) {
        CliCommand::Checksum { path } => assert_eq!(path, "/tmp/Cool_Decal.png"),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_categories() {
    assert!(matches!(
        parse(&["rbxdl", "categories"]),
        CliCommand::Categories
    ));
}

#[test]
fn cli_parse_completions() {
    match parse(&["rbxdl", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
    assert!(Cli::try_parse_from(["rbxdl", "completions", "cmd"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["rbxdl", "add", "x"]).is_err());
}
