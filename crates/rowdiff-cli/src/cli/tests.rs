#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::{CommandFactory, Parser};

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("rowdiff").chain(args.iter().copied()))
        .expect("arguments should parse")
}

/// The root help output must contain all top-level subcommand names.
#[test]
fn test_root_help_lists_all_subcommands() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());
    for name in ["diff", "inspect"] {
        assert!(
            help.contains(name),
            "root help should mention subcommand '{name}'"
        );
    }
}

/// The root help output must describe every global flag.
#[test]
fn test_root_help_lists_global_flags() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());
    for flag in [
        "--format",
        "--quiet",
        "--verbose",
        "--max-file-size",
        "--no-color",
        "--help",
        "--version",
    ] {
        assert!(help.contains(flag), "root help should mention flag '{flag}'");
    }
}

/// `rowdiff diff --help` must mention both inputs and the key options.
#[test]
fn test_diff_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("diff")
        .expect("diff subcommand should exist");
    let help = format!("{}", sub.render_help());
    for needle in [
        "LEFT",
        "RIGHT",
        "--key-field",
        "--parent-field",
        "--child-field",
        "--ignore-field",
        "--ignore-moves",
        "--include",
        "--exclude",
    ] {
        assert!(help.contains(needle), "diff help should mention {needle}");
    }
}

#[test]
fn test_inspect_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("inspect")
        .expect("inspect subcommand should exist");
    let help = format!("{}", sub.render_help());
    assert!(help.contains("FILE"), "inspect help should mention FILE");
    assert!(help.contains("--sheet"), "inspect help should mention --sheet");
}

#[test]
fn test_diff_parses_parent_child_keys() {
    let cli = parse(&["diff", "a.csv", "b.csv", "-p", "Parent", "-c", "1", "-i"]);
    match cli.command {
        Command::Diff {
            left,
            right,
            source,
            ..
        } => {
            assert!(matches!(left, PathOrStdin::Path(p) if p == PathBuf::from("a.csv")));
            assert!(matches!(right, PathOrStdin::Path(_)));
            assert_eq!(source.parent_field, ["Parent"]);
            assert_eq!(source.child_field, ["1"]);
            assert!(source.ignore_case);
            assert_eq!(source.delimiter, ',');
        }
        other => panic!("expected diff, got {other:?}"),
    }
}

#[test]
fn test_dash_means_stdin() {
    let cli = parse(&["inspect", "-", "-k", "0"]);
    match cli.command {
        Command::Inspect { file, .. } => assert!(matches!(file, PathOrStdin::Stdin)),
        other => panic!("expected inspect, got {other:?}"),
    }
}

#[test]
fn test_field_names_split_on_commas() {
    let cli = parse(&[
        "inspect",
        "x.csv",
        "-k",
        "Id",
        "--field-names",
        "Id,Name,Note",
        "--ignore-header",
    ]);
    match cli.command {
        Command::Inspect { source, .. } => {
            assert_eq!(
                source.field_names,
                Some(vec!["Id".to_owned(), "Name".to_owned(), "Note".to_owned()])
            );
            assert!(source.ignore_header);
        }
        other => panic!("expected inspect, got {other:?}"),
    }
}

#[test]
fn test_key_field_conflicts_with_parent_field() {
    let result = Cli::try_parse_from(["rowdiff", "diff", "a", "b", "-k", "0", "-p", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["rowdiff", "-q", "-v", "inspect", "a", "-k", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_ignore_header_requires_field_names() {
    let result = Cli::try_parse_from(["rowdiff", "inspect", "a", "-k", "0", "--ignore-header"]);
    assert!(result.is_err());
}

#[test]
fn test_global_format_after_subcommand() {
    let cli = parse(&["diff", "a", "b", "-k", "0", "--format", "json"]);
    assert!(matches!(cli.format, OutputFormat::Json));
}
