use std::fmt;

use crate::template::{Result, TemplateError};

/// How a captured value is converted before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Destructuring {
	/// Scalars stay scalars, collections become sequences, anything else is stringified.
	#[default]
	Default,
	/// Expand non-scalar values into structures (`@` prefix).
	Destructure,
	/// Always capture the value's text form (`$` prefix).
	Stringify,
}

impl Destructuring {
	/// Map a leading tag character to its destructuring mode.
	pub fn from_hint(hint: char) -> Option<Self> {
		match hint {
			'@' => Some(Self::Destructure),
			'$' => Some(Self::Stringify),
			_ => None,
		}
	}
}

/// Side of the padded region where a rendered value sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentDirection {
	/// Value first, padding after (`{Name,-10}`).
	Left,
	/// Padding first, value after (`{Name,10}`).
	Right,
}

/// Minimum rendered width of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
	/// Padding side.
	pub direction: AlignmentDirection,
	/// Minimum width in characters.
	pub width: usize,
}

impl Alignment {
	/// Create an alignment.
	pub fn new(direction: AlignmentDirection, width: usize) -> Self {
		Self { direction, width }
	}

	/// Build from a signed width: negative means left-aligned.
	pub fn from_signed(width: i32) -> Self {
		let direction = if width < 0 { AlignmentDirection::Left } else { AlignmentDirection::Right };
		Self {
			direction,
			width: width.unsigned_abs() as usize,
		}
	}
}

/// Literal run of template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToken {
	/// Unescaped text.
	pub text: Box<str>,
	/// Byte offset of the token in the template.
	pub start_index: usize,
}

impl TextToken {
	/// Create a text token.
	pub fn new(text: impl Into<Box<str>>, start_index: usize) -> Self {
		Self {
			text: text.into(),
			start_index,
		}
	}
}

/// Placeholder bound to a captured property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyToken {
	name: Box<str>,
	raw_text: Box<str>,
	format: Option<Box<str>>,
	alignment: Option<Alignment>,
	destructuring: Destructuring,
	position: Option<usize>,
	start_index: usize,
}

impl PropertyToken {
	/// Create a property token, validating that name and raw text are present.
	pub fn new(
		name: &str,
		raw_text: &str,
		format: Option<&str>,
		alignment: Option<Alignment>,
		destructuring: Destructuring,
		start_index: usize,
	) -> Result<Self> {
		if name.is_empty() {
			return Err(TemplateError::InvalidArgument {
				name: "name",
				reason: "property name must not be empty",
			});
		}
		if raw_text.is_empty() {
			return Err(TemplateError::InvalidArgument {
				name: "raw_text",
				reason: "raw text must not be empty",
			});
		}
		Ok(Self::from_parts(name, raw_text, format, alignment, destructuring, start_index))
	}

	pub(crate) fn from_parts(
		name: &str,
		raw_text: &str,
		format: Option<&str>,
		alignment: Option<Alignment>,
		destructuring: Destructuring,
		start_index: usize,
	) -> Self {
		Self {
			name: name.into(),
			raw_text: raw_text.into(),
			format: format.map(Into::into),
			alignment,
			destructuring,
			position: parse_position(name),
			start_index,
		}
	}

	/// Property name as written (without destructuring hint).
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Exact source text of the placeholder, braces included.
	pub fn raw_text(&self) -> &str {
		&self.raw_text
	}

	/// Format string following `:`.
	pub fn format(&self) -> Option<&str> {
		self.format.as_deref()
	}

	/// Alignment following `,`.
	pub fn alignment(&self) -> Option<Alignment> {
		self.alignment
	}

	/// Destructuring mode selected by the `@`/`$` hint.
	pub fn destructuring(&self) -> Destructuring {
		self.destructuring
	}

	/// Index into the value list when the name is a non-negative integer.
	pub fn position(&self) -> Option<usize> {
		self.position
	}

	/// Whether the name is a positional index.
	pub fn is_positional(&self) -> bool {
		self.position.is_some()
	}

	/// Byte offset of the placeholder in the template.
	pub fn start_index(&self) -> usize {
		self.start_index
	}
}

impl fmt::Display for PropertyToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw_text)
	}
}

/// One parsed element of a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// Literal text.
	Text(TextToken),
	/// Property placeholder.
	Property(PropertyToken),
}

impl Token {
	/// Byte offset of the token in the template.
	pub fn start_index(&self) -> usize {
		match self {
			Token::Text(token) => token.start_index,
			Token::Property(token) => token.start_index,
		}
	}

	/// Property token, if this is a placeholder.
	pub fn as_property(&self) -> Option<&PropertyToken> {
		match self {
			Token::Property(token) => Some(token),
			Token::Text(_) => None,
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Text(token) => f.write_str(&token.text),
			Token::Property(token) => token.fmt(f),
		}
	}
}

fn parse_position(name: &str) -> Option<usize> {
	if name.is_empty() || !name.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	name.parse::<i32>().ok().map(|position| position as usize)
}
