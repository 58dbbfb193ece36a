use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors produced while constructing templates, converters, and cultures.
///
/// Capturing and rendering never fail; only explicit construction does.
#[derive(Debug, Error)]
pub enum TemplateError {
	/// A required constructor argument was empty.
	#[error("invalid argument {name}: {reason}")]
	InvalidArgument {
		/// Argument name.
		name: &'static str,
		/// Why the argument was rejected.
		reason: &'static str,
	},
	/// Maximum destructuring depth must allow at least one level.
	#[error("invalid maximum destructuring depth {max_depth} (expected >= 1)")]
	InvalidMaxDepth {
		/// Rejected depth ceiling.
		max_depth: u32,
	},
	/// Requested culture name has no built-in table.
	#[error("unknown culture: {name}")]
	UnknownCulture {
		/// User-provided culture name.
		name: String,
	},
	/// JSON encoding of captured properties failed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
}

/// Failure reported by a member accessor while a value is being destructured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AccessError {
	message: Box<str>,
}

impl AccessError {
	/// Create an accessor failure with a human-readable message.
	pub fn new(message: impl Into<Box<str>>) -> Self {
		Self { message: message.into() }
	}

	/// Failure message.
	pub fn message(&self) -> &str {
		&self.message
	}
}
