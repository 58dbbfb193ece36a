use crate::template::{Alignment, AlignmentDirection, FormatProvider, PropertyMap, PropertyToken, Token};

/// Render tokens against bound properties into `out`.
pub(crate) fn render_tokens(tokens: &[Token], properties: &PropertyMap<'_>, provider: Option<&dyn FormatProvider>, out: &mut String) {
	for token in tokens {
		match token {
			Token::Text(text) => out.push_str(&text.text),
			Token::Property(property) => render_property_token(property, properties, provider, out),
		}
	}
}

/// Unbound placeholders render their source text unchanged.
fn render_property_token(token: &PropertyToken, properties: &PropertyMap<'_>, provider: Option<&dyn FormatProvider>, out: &mut String) {
	let Some(value) = properties.get(token.name()) else {
		out.push_str(token.raw_text());
		return;
	};

	match token.alignment() {
		None => value.render(out, token.format(), provider),
		Some(alignment) => {
			let mut scratch = String::new();
			value.render(&mut scratch, token.format(), provider);
			push_aligned(&scratch, alignment, out);
		}
	}
}

/// Pad `text` with spaces to the alignment width; longer text is kept whole.
pub(crate) fn push_aligned(text: &str, alignment: Alignment, out: &mut String) {
	let padding = alignment.width.saturating_sub(text.chars().count());
	match alignment.direction {
		AlignmentDirection::Left => {
			out.push_str(text);
			out.extend(std::iter::repeat_n(' ', padding));
		}
		AlignmentDirection::Right => {
			out.extend(std::iter::repeat_n(' ', padding));
			out.push_str(text);
		}
	}
}
