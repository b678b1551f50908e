//! The `vox` command handlers.

use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use voxc::{run, Cli, CliError};

fn run_args(args: &[&str]) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("vox").chain(args.iter().copied()))
        .unwrap_or_else(|err| panic!("bad arguments {args:?}: {err}"));
    run(&cli.command)
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vox-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn eval_prints_value_and_kind() {
    assert_eq!(run_args(&["eval", "2 + 3 * 4"]).unwrap(), "14 (float)");
    assert_eq!(run_args(&["eval", "'a' + 'b'"]).unwrap(), "ab (string)");
    assert_eq!(run_args(&["eval", ""]).unwrap(), "null (null)");
}

#[test]
fn eval_reads_fields() {
    assert_eq!(
        run_args(&["eval", "[gold] >= 10 and name = 'Ada'", "-f", "gold=12", "--field", "name=Ada"])
            .unwrap(),
        "true (boolean)"
    );
}

#[test]
fn eval_reports_errors() {
    let err = run_args(&["eval", "1 +"]).unwrap_err();
    assert!(matches!(err, CliError::Expression(_)));
    assert_eq!(err.to_string(), "missing operand for `+` (at 2..3)");
}

#[test]
fn interp_renders_templates() {
    assert_eq!(
        run_args(&["interp", "Hello {name}!", "-f", "name=World"]).unwrap(),
        "Hello World!"
    );
}

#[test]
fn lex_lists_tokens() {
    let output = run_args(&["lex", "-1 + max(2)"]).unwrap();
    let kinds: Vec<&str> = output
        .lines()
        .map(|line| line.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["Operator", "Number", "Operator", "Function", "LeftParen", "Number", "RightParen"]
    );
}

#[test]
fn parse_prints_tree_and_text() {
    assert_eq!(
        run_args(&["parse", "2+3*4"]).unwrap(),
        "Operator +\n  Number 2\n  Operator *\n    Number 3\n    Number 4\n2 + 3 * 4"
    );
    assert_eq!(run_args(&["parse", "  "]).unwrap(), "(empty)");
}

#[test]
fn script_files() {
    let path = scratch_file(
        "condition.json",
        r#"[
            { "kind": "Function", "payload": { "name": ">", "arity": 2 } },
            { "kind": "Integer", "payload": 5 },
            { "kind": "String", "payload": "3" }
        ]"#,
    );
    let arg = path.to_str().unwrap();
    assert_eq!(run_args(&["script", arg, "--condition"]).unwrap(), "true");
    assert_eq!(run_args(&["script", arg]).unwrap(), "true (boolean)");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn script_depth_limit() {
    let path = scratch_file(
        "deep.json",
        r#"[
            { "kind": "Function", "payload": { "name": "not" } },
            { "kind": "Function", "payload": { "name": "not" } },
            { "kind": "Boolean", "payload": true }
        ]"#,
    );
    let arg = path.to_str().unwrap();
    assert_eq!(run_args(&["script", arg, "--max-depth", "2"]).unwrap(), "true (boolean)");
    let err = run_args(&["script", arg, "--max-depth", "1"]).unwrap_err();
    assert_eq!(err.to_string(), "block 1: calls nested deeper than 1");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn script_file_errors() {
    let missing = std::env::temp_dir().join("vox-no-such-script.json");
    assert!(matches!(
        run_args(&["script", missing.to_str().unwrap()]),
        Err(CliError::Io { .. })
    ));

    let path = scratch_file("broken.json", r#"[{ "kind": "Loop" }]"#);
    assert!(matches!(
        run_args(&["script", path.to_str().unwrap()]),
        Err(CliError::Json { .. })
    ));
    std::fs::remove_file(&path).unwrap();
}
