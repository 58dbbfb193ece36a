use crate::template::{Alignment, AlignmentDirection, Destructuring, PropertyToken, TextToken, Token};

/// Split template text into text and property tokens.
///
/// Tokenizing is total: any placeholder that does not match
/// `{[@|$]name[,alignment][:format]}` is kept as literal text, so the
/// concatenated token sources always cover the whole input.
pub fn tokenize(text: &str) -> Vec<Token> {
	if text.is_empty() {
		return vec![Token::Text(TextToken::new("", 0))];
	}

	let mut tokens = Vec::new();
	let mut next = 0_usize;
	loop {
		let before_text = next;
		let (text_token, after_text) = parse_text_token(text, next);
		next = after_text;
		if next > before_text {
			tokens.push(Token::Text(text_token));
		}
		if next == text.len() {
			break;
		}

		let before_prop = next;
		let (property_token, after_prop) = parse_property_token(text, next);
		next = after_prop;
		if next > before_prop {
			tokens.push(property_token);
		}
		if next == text.len() {
			break;
		}
	}
	tokens
}

fn parse_text_token(text: &str, start: usize) -> (TextToken, usize) {
	let bytes = text.as_bytes();
	let mut accum = String::new();
	let mut idx = start;

	while let Some(ch) = text[idx..].chars().next() {
		if ch == '{' {
			if bytes.get(idx + 1) == Some(&b'{') {
				accum.push('{');
				idx += 2;
				continue;
			}
			break;
		}

		accum.push(ch);
		idx += ch.len_utf8();
		if ch == '}' && bytes.get(idx) == Some(&b'}') {
			idx += 1;
		}
	}

	(TextToken::new(accum, start), idx)
}

fn parse_property_token(text: &str, start: usize) -> (Token, usize) {
	let mut idx = start + 1;
	while let Some(ch) = text[idx..].chars().next() {
		if !is_valid_in_property_tag(ch) {
			break;
		}
		idx += ch.len_utf8();
	}

	if text.as_bytes().get(idx) != Some(&b'}') {
		return (Token::Text(TextToken::new(&text[start..idx], start)), idx);
	}

	let next = idx + 1;
	let raw_text = &text[start..next];
	let literal = || (Token::Text(TextToken::new(raw_text, start)), next);

	let content = &text[start + 1..idx];
	if content.is_empty() {
		return literal();
	}

	let Some((name_part, format, alignment)) = split_tag_content(content) else {
		return literal();
	};

	let (destructuring, name) = match name_part.chars().next().and_then(Destructuring::from_hint) {
		Some(destructuring) => (destructuring, &name_part[1..]),
		None => (Destructuring::Default, name_part),
	};

	if name.is_empty() || !name.chars().all(is_valid_in_property_name) {
		return literal();
	}

	if format.is_some_and(|format| !format.chars().all(is_valid_in_format)) {
		return literal();
	}

	let alignment = match alignment {
		Some(raw) => match parse_alignment(raw) {
			Some(alignment) => Some(alignment),
			None => return literal(),
		},
		None => None,
	};

	let token = PropertyToken::from_parts(name, raw_text, format, alignment, destructuring, start);
	(Token::Property(token), next)
}

/// Split `name[,alignment][:format]`; `None` when the delimiters leave an empty segment.
fn split_tag_content(content: &str) -> Option<(&str, Option<&str>, Option<&str>)> {
	let format_delim = content.find(':');
	let align_delim = content.find(',');
	let last = content.len() - 1;

	let trailing = |from: usize| if from == last { None } else { Some(&content[from + 1..]) };

	match (align_delim, format_delim) {
		(None, None) => Some((content, None, None)),
		(None, Some(format_at)) => Some((&content[..format_at], trailing(format_at), None)),
		(Some(align_at), Some(format_at)) if align_at > format_at => Some((&content[..format_at], trailing(format_at), None)),
		(Some(align_at), None) => {
			if align_at == last {
				return None;
			}
			Some((&content[..align_at], None, Some(&content[align_at + 1..])))
		}
		(Some(align_at), Some(format_at)) => {
			if align_at + 1 == format_at {
				return None;
			}
			Some((&content[..align_at], trailing(format_at), Some(&content[align_at + 1..format_at])))
		}
	}
}

fn parse_alignment(raw: &str) -> Option<Alignment> {
	if !raw.chars().all(|ch| ch.is_ascii_digit() || ch == '-') {
		return None;
	}

	let (direction, digits) = match raw.rfind('-') {
		None => (AlignmentDirection::Right, raw),
		Some(0) => (AlignmentDirection::Left, &raw[1..]),
		Some(_) => return None,
	};

	let width = digits.parse::<i32>().ok()?;
	if width == 0 {
		return None;
	}
	Some(Alignment::new(direction, width as usize))
}

fn is_valid_in_property_tag(ch: char) -> bool {
	is_valid_in_destructuring_hint(ch) || is_valid_in_property_name(ch) || is_valid_in_format(ch) || ch == ':'
}

fn is_valid_in_destructuring_hint(ch: char) -> bool {
	ch == '@' || ch == '$'
}

fn is_valid_in_property_name(ch: char) -> bool {
	ch.is_alphanumeric() || ch == '_'
}

fn is_valid_in_format(ch: char) -> bool {
	ch != '}' && (ch.is_alphanumeric() || is_punctuation(ch) || ch == ' ')
}

/// Unicode punctuation as opposed to symbols: `$ + < = > ^ ` | ~` are excluded.
fn is_punctuation(ch: char) -> bool {
	if ch.is_ascii() {
		return ch.is_ascii_punctuation() && !matches!(ch, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~');
	}
	matches!(
		ch,
		'\u{a1}' | '\u{a7}' | '\u{ab}' | '\u{b6}' | '\u{b7}' | '\u{bb}' | '\u{bf}' | '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205e}' | '\u{3001}'..='\u{3003}'
	)
}
