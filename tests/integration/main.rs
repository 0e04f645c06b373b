//! Integration tests for trellis
//!
//! These spawn the built binary with records piped on stdin and verify the
//! DOT and debug-dump surfaces end to end.

use std::io::Write as _;
use std::process::{Command, Output, Stdio};

use serde_json::{Value, json};

const SAMPLE: &str = concat!(
    r#"{"src":{"id":"a"},"dst":{"id":"b"}}"#,
    "\n",
    r#"{"src":{"id":"b"},"dst":{"id":"c"}}"#,
    "\n",
    r#"{"src":{"id":"a"},"dst":{"id":"b"}}"#,
    "\n",
);

const GROUPED_SAMPLE: &str = concat!(
    r#"{"src":{"id":"a","team":"x"},"dst":{"id":"b","team":"x"}}"#,
    "\n",
    r#"{"src":{"id":"b"},"dst":{"id":"c","team":"y"}}"#,
    "\n",
    r#"{"src":{"id":"a","another":"alpha"},"dst":{"id":"b"}}"#,
    "\n",
);

fn run(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_trellis"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn trellis");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for trellis")
}

#[test]
fn test_help() {
    let output = run(&["--help"], "");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("trellis"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("debug"));
}

#[test]
fn test_version() {
    let output = run(&["version"], "");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("trellis v"));
}

#[test]
fn test_render_writes_dot_to_stdout() {
    let output = run(&["render"], SAMPLE);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("strict digraph {\n"));
    assert!(stdout.ends_with("}\n"));
    assert!(stdout.contains("\"a\" -> \"b\""));
    assert!(stdout.contains("label=\"2\""));
    assert!(stdout.contains("tooltip=\"a -> b [2]\""));
}

#[test]
fn test_render_name_key() {
    let output = run(&["render", "-k", "another"], GROUPED_SAMPLE);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tooltip=\"alpha -> b [2]\""));
}

#[test]
fn test_render_group_key_emits_clusters() {
    let output = run(&["render", "-g", "team"], GROUPED_SAMPLE);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("subgraph \"cluster_x\""));
    assert!(stdout.contains("subgraph \"cluster_y\""));
}

#[test]
fn test_render_out_writes_dot_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("graph.dot");
    let output = run(&["render", "--out", path.to_str().expect("utf-8 path")], SAMPLE);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let source = std::fs::read_to_string(&path).expect("reading output file");
    assert!(source.starts_with("strict digraph {\n"));
}

#[test]
fn test_malformed_line_aborts() {
    let output = run(&["render"], "{\"src\":{\"id\":\"a\"}}\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed record"), "stderr: {stderr}");
}

#[test]
fn test_debug_dump_golden() {
    let output = run(&["debug"], SAMPLE);
    assert!(output.status.success());
    let got: Value = serde_json::from_slice(&output.stdout).expect("dump is JSON");

    let want = json!({
        "nodes": {
            "map": {
                "a": {"id": "a", "attrs": {}},
                "b": {"id": "b", "attrs": {}},
                "c": {"id": "c", "attrs": {}},
            },
            "source": [
                {"src": {"id": "a", "attrs": {}}, "dst": {"id": "b", "attrs": {}}},
                {"src": {"id": "b", "attrs": {}}, "dst": {"id": "c", "attrs": {}}},
                {"src": {"id": "a", "attrs": {}}, "dst": {"id": "b", "attrs": {}}},
            ],
            "name": {},
        },
        "stat": {
            "nodes": {"a": 2, "b": 3, "c": 1},
            "edges": {"a|b": 2, "b|c": 1},
        },
        "ranking": {
            "nodes": [
                {
                    "key": "b",
                    "value": 3,
                    "place": 1,
                    "percentile": 100.0 * 1.0 / 3.0,
                    "value_percentile": 50.0,
                },
                {
                    "key": "a",
                    "value": 2,
                    "place": 2,
                    "percentile": 100.0 * 2.0 / 3.0,
                    "value_percentile": 100.0 * 5.0 / 6.0,
                },
                {
                    "key": "c",
                    "value": 1,
                    "place": 3,
                    "percentile": 100.0,
                    "value_percentile": 100.0,
                },
            ],
            "edges": {
                "a|b": {
                    "key": ["a", "b"],
                    "value": 2,
                    "place": 1,
                    "percentile": 50.0,
                    "value_percentile": 100.0 * 2.0 / 3.0,
                },
                "b|c": {
                    "key": ["b", "c"],
                    "value": 1,
                    "place": 2,
                    "percentile": 100.0,
                    "value_percentile": 100.0,
                },
            },
        },
        "group": {},
    });
    assert_eq!(got, want);
}

#[test]
fn test_debug_dump_grouped() {
    let output = run(&["debug", "-g", "team", "-k", "another"], GROUPED_SAMPLE);
    assert!(output.status.success());
    let got: Value = serde_json::from_slice(&output.stdout).expect("dump is JSON");

    assert_eq!(got["nodes"]["name"], json!({"a": "alpha"}));
    assert_eq!(got["group"]["name"], json!({"a": "x", "b": "x", "c": "y"}));
    // a→b twice inside team x: both drop; only x→y survives
    assert_eq!(got["group"]["stat"]["nodes"], json!({"x": 1, "y": 1}));
    assert_eq!(got["group"]["stat"]["edges"], json!({"x|y": 1}));
    assert_eq!(got["group"]["ranking"]["edges"]["x|y"]["place"], json!(1));
    // the plain view is unaffected by grouping
    assert_eq!(got["stat"]["nodes"], json!({"a": 2, "b": 3, "c": 1}));
}
