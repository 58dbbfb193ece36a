#![allow(missing_docs)]

use msgtemplate_testkit::{run, run_json, run_stdout};

const BIN: &str = env!("CARGO_BIN_EXE_msgtemplate");

#[test]
fn format_renders_json_values() {
	let out = run_stdout(BIN, &["format", "Hello, {Name}! You have {Count} items", "world", "3"]);
	assert_eq!(out.trim_end(), "Hello, \"world\"! You have 3 items");
}

#[test]
fn format_applies_culture() {
	let out = run_stdout(BIN, &["format", "{Amount:0.00}", "1.5", "--culture", "fr-FR"]);
	assert_eq!(out.trim_end(), "1,50");
}

#[test]
fn format_destructures_objects() {
	let out = run_stdout(BIN, &["format", "{@Point}", r#"{"x": 1, "y": -2}"#]);
	assert_eq!(out.trim_end(), "{ x: 1, y: -2 }");
}

#[test]
fn unknown_culture_is_an_error() {
	let output = run(BIN, &["format", "{A}", "1", "--culture", "xx-YY"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: unknown culture: xx-YY"));
}

#[test]
fn zero_max_depth_is_an_error() {
	let output = run(BIN, &["capture", "{A}", "1", "--max-depth", "0"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: invalid maximum destructuring depth 0"));
}

#[test]
fn capture_prints_properties_as_json() {
	let json = run_json(BIN, &["capture", "{A} {@B} {$C}", "-5", "[1, 2]", "text"]);
	assert_eq!(json["A"], -5);
	assert_eq!(json["B"], serde_json::json!([1, 2]));
	assert_eq!(json["C"], "text");
}

#[test]
fn tokens_json_describes_each_token() {
	let json = run_json(BIN, &["tokens", "Hi {@User,-8:x}!", "--json"]);
	assert_eq!(json["binding"], "named");
	let tokens = json["tokens"].as_array().expect("tokens array");
	assert_eq!(tokens.len(), 3);
	assert_eq!(tokens[0]["kind"], "text");
	assert_eq!(tokens[1]["name"], "User");
	assert_eq!(tokens[1]["destructuring"], "destructure");
	assert_eq!(tokens[1]["alignment"], "-8");
	assert_eq!(tokens[1]["format"], "x");
	assert_eq!(tokens[1]["start"], 3);
	assert_eq!(tokens[2]["text"], "!");
}

#[test]
fn tokens_text_lists_rows() {
	let out = run_stdout(BIN, &["tokens", "{0} and {1}"]);
	assert!(out.starts_with("binding: Positional\ntokens: 3\n"));
}
