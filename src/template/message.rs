use std::fmt;

use tracing::warn;

use crate::template::parser::tokenize;
use crate::template::render::render_tokens;
use crate::template::{Capture, Converter, FormatProvider, PropertyList, PropertyToken, Token};

/// How a template's placeholders are paired with values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingMode {
	/// The template has no placeholders.
	None,
	/// Every placeholder is an index into the value list.
	Positional,
	/// Placeholders take values in declaration order.
	Named,
}

/// Parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
	text: Box<str>,
	tokens: Vec<Token>,
	binding_mode: BindingMode,
}

impl MessageTemplate {
	/// Build a template from already-scanned tokens.
	///
	/// A template mixing positional and named placeholders binds by name.
	pub fn new(text: impl Into<Box<str>>, tokens: Vec<Token>) -> Self {
		let text = text.into();
		let mut any_property = false;
		let mut all_positional = true;
		let mut any_positional = false;
		for token in tokens.iter().filter_map(Token::as_property) {
			any_property = true;
			if token.is_positional() {
				any_positional = true;
			} else {
				all_positional = false;
			}
		}

		let binding_mode = match (any_property, all_positional) {
			(false, _) => BindingMode::None,
			(true, true) => BindingMode::Positional,
			(true, false) => {
				if any_positional {
					warn!(template = &*text, "message template mixes positional and named properties");
				}
				BindingMode::Named
			}
		};

		Self { text, tokens, binding_mode }
	}

	/// Parse template text; malformed placeholders become literal text.
	pub fn parse(text: &str) -> Self {
		Self::new(text, tokenize(text))
	}

	/// Source text.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Tokens in source order.
	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Placeholder tokens in source order.
	pub fn property_tokens(&self) -> impl Iterator<Item = &PropertyToken> {
		self.tokens.iter().filter_map(Token::as_property)
	}

	/// Placeholder binding mode.
	pub fn binding_mode(&self) -> BindingMode {
		self.binding_mode
	}

	/// Render with bound properties.
	pub fn render(&self, properties: &PropertyList, provider: Option<&dyn FormatProvider>) -> String {
		let mut out = String::with_capacity(self.text.len());
		self.render_to(properties, provider, &mut out);
		out
	}

	/// Render with bound properties, appending to `out`.
	pub fn render_to(&self, properties: &PropertyList, provider: Option<&dyn FormatProvider>, out: &mut String) {
		render_tokens(&self.tokens, &properties.to_map(), provider, out);
	}

	/// Capture `values` with the default converter and render.
	pub fn format(&self, provider: Option<&dyn FormatProvider>, values: &[&dyn Capture]) -> String {
		let properties = Converter::default().capture(self, values);
		self.render(&properties, provider)
	}
}

impl fmt::Display for MessageTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

impl From<&str> for MessageTemplate {
	fn from(text: &str) -> Self {
		Self::parse(text)
	}
}

/// Parse template text.
pub fn parse(text: &str) -> MessageTemplate {
	MessageTemplate::parse(text)
}

/// Bind and convert `values` with the default converter (depth 10).
pub fn capture(template: &MessageTemplate, values: &[&dyn Capture]) -> PropertyList {
	Converter::default().capture(template, values)
}

/// Render a template with bound properties.
pub fn render(template: &MessageTemplate, properties: &PropertyList, provider: Option<&dyn FormatProvider>) -> String {
	template.render(properties, provider)
}

/// Parse, capture and render in one call.
///
/// ```
/// use msgtemplate::template::format;
///
/// let text = format(None, "Hello, {Name}!", &[&"world"]);
/// assert_eq!(text, "Hello, \"world\"!");
/// ```
pub fn format(provider: Option<&dyn FormatProvider>, text: &str, values: &[&dyn Capture]) -> String {
	MessageTemplate::parse(text).format(provider, values)
}
