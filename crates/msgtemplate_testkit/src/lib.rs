//! Shared test helpers for workspace crates.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

/// Run a binary with the given arguments and collect its output.
pub fn run(bin: impl AsRef<Path>, args: &[&str]) -> Output {
	Command::new(bin.as_ref())
		.args(args)
		.env_remove("MSGTEMPLATE_LOG")
		.output()
		.unwrap_or_else(|err| panic!("failed to run {}: {err}", bin.as_ref().display()))
}

/// Run a binary, assert success, and return its stdout as text.
pub fn run_stdout(bin: impl AsRef<Path>, args: &[&str]) -> String {
	let output = run(bin, args);
	assert!(
		output.status.success(),
		"command failed: {args:?}\nstderr:\n{}",
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).unwrap_or_else(|err| panic!("stdout is not UTF-8: {err}"))
}

/// Run a binary, assert success, and parse its stdout as JSON.
pub fn run_json(bin: impl AsRef<Path>, args: &[&str]) -> Value {
	let stdout = run_stdout(bin, args);
	serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("stdout is not JSON: {err}\n{stdout}"))
}
