// tests/cli_commands.rs
//! Runs the `bladegraph` binary against small template trees.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, content).expect("write template");
}

/// layouts/app <- home (extends); home -> partials/nav (include); home -> missing (dangling)
fn views() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    write(dir.path(), "layouts/app.blade.php", "<html>@yield('content')</html>");
    write(
        dir.path(),
        "home.blade.php",
        "@extends('layouts.app')\n@section('content')\n@include('partials.nav')\n@include('missing.partial')\n@endsection\n",
    );
    write(dir.path(), "partials/nav.blade.php", "<nav></nav>");
    write(dir.path(), "README.md", "not a template");
    dir
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bladegraph"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute bladegraph")
}

fn path_arg(p: &Path) -> &str {
    p.to_str().expect("utf-8 temp path")
}

#[test]
fn scan_writes_id_map_and_records() {
    let dir = views();
    let out = TempDir::new().unwrap();
    let output = run(&["scan", path_arg(dir.path()), "--out", path_arg(out.path())]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let id_map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("templates.json")).unwrap()).unwrap();
    assert_eq!(id_map["1"], "home.blade.php");
    assert_eq!(id_map["2"], "layouts/app.blade.php");
    assert_eq!(id_map["3"], "partials/nav.blade.php");

    let records: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("dependencies.json")).unwrap()).unwrap();
    let home = records["1"].as_array().expect("records for home");
    assert_eq!(home.len(), 2);
    assert_eq!(home[0]["target"], 2);
    assert_eq!(home[0]["kind"], "extends");
    assert_eq!(home[1]["target"], 3);
    assert_eq!(home[1]["kind"], "include");
    // Templates without references still get an (empty) entry.
    assert_eq!(records["2"], serde_json::json!([]));
    assert_eq!(records["3"], serde_json::json!([]));
    assert_eq!(records.as_object().map(|m| m.len()), Some(3));
}

#[test]
fn render_prints_dot() {
    let dir = views();
    let output = run(&["render", path_arg(dir.path())]);
    assert!(output.status.success());
    let dot = String::from_utf8_lossy(&output.stdout);
    assert!(dot.starts_with("digraph templates {"));
    assert!(dot.contains("\"2\" -> \"1\" [label=\"extends\"];"));
    assert!(dot.contains("\"1\" -> \"3\" [label=\"include\"];"));
}

#[test]
fn render_scoped_by_logical_name() {
    let dir = views();
    let output = run(&["render", path_arg(dir.path()), "--from", "partials.nav", "--no-edge-labels"]);
    assert!(output.status.success());
    let dot = String::from_utf8_lossy(&output.stdout);
    assert!(dot.contains("partials/nav.blade.php"));
    assert!(!dot.contains("home.blade.php"));
}

#[test]
fn render_unknown_scope_fails() {
    let dir = views();
    let output = run(&["render", path_arg(dir.path()), "--from", "nope.nothing"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn check_json_reports_dangling() {
    let dir = views();
    let output = run(&["check", path_arg(dir.path()), "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["templates"], 3);
    assert_eq!(value["dangling"][0]["target"], "missing.partial");
    assert_eq!(value["dangling"][0]["source"], "home.blade.php");
    assert_eq!(value["dangling"][0]["line"], 4);
    assert_eq!(value["passed"], true);
}

#[test]
fn check_fails_on_inheritance_cycle() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.blade.php", "@extends('b')");
    write(dir.path(), "b.blade.php", "@extends('a')");
    let output = run(&["check", path_arg(dir.path())]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stdout).contains("INHERITANCE CYCLE"));
}

#[test]
fn usage_error_differs_from_failed_check() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.blade.php", "@extends('b')");
    write(dir.path(), "b.blade.php", "@extends('a')");
    let failed = run(&["check", path_arg(dir.path())]);
    let usage = run(&["check", path_arg(dir.path()), "--bogus"]);
    assert_eq!(usage.status.code(), Some(2));
    assert_ne!(usage.status.code(), failed.status.code());
    assert!(!String::from_utf8_lossy(&usage.stderr).is_empty());
}

#[test]
fn help_exits_zero() {
    let output = run(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("bladegraph"));
}

#[test]
fn query_ancestors() {
    let dir = views();
    let output = run(&["query", path_arg(dir.path()), "partials/nav.blade.php", "--ancestors"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["home.blade.php", "layouts/app.blade.php"]);
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    let output = run(&["check", path_arg(&missing)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn config_file_sets_render_defaults() {
    let dir = views();
    write(dir.path(), "bladegraph.toml", "[render]\nlabels = \"id\"\nedge_labels = false\n");
    let output = run(&["render", path_arg(dir.path())]);
    assert!(output.status.success());
    let dot = String::from_utf8_lossy(&output.stdout);
    assert!(dot.contains("\"1\" [label=\"1\"];"));
    assert!(!dot.contains("label=\"extends\""));
}
