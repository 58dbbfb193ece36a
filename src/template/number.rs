use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::template::{NumberFormat, Scalar};

/// Numeric scalar payload widened for formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
	Int { value: i128, bits: u32 },
	UInt { value: u128, bits: u32 },
	F32(f32),
	F64(f64),
	Decimal(Decimal),
}

/// Unsigned decimal digits split around the decimal point.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Digits {
	negative: bool,
	int: String,
	frac: String,
}

impl Digits {
	fn is_zero(&self) -> bool {
		self.int.bytes().chain(self.frac.bytes()).all(|byte| byte == b'0')
	}
}

impl Number {
	pub(crate) fn from_scalar(scalar: &Scalar) -> Option<Self> {
		let number = match scalar {
			Scalar::I8(v) => Self::Int { value: i128::from(*v), bits: 8 },
			Scalar::I16(v) => Self::Int { value: i128::from(*v), bits: 16 },
			Scalar::I32(v) => Self::Int { value: i128::from(*v), bits: 32 },
			Scalar::I64(v) => Self::Int { value: i128::from(*v), bits: 64 },
			Scalar::I128(v) => Self::Int { value: *v, bits: 128 },
			Scalar::U8(v) => Self::UInt { value: u128::from(*v), bits: 8 },
			Scalar::U16(v) => Self::UInt { value: u128::from(*v), bits: 16 },
			Scalar::U32(v) => Self::UInt { value: u128::from(*v), bits: 32 },
			Scalar::U64(v) => Self::UInt { value: u128::from(*v), bits: 64 },
			Scalar::U128(v) => Self::UInt { value: *v, bits: 128 },
			Scalar::F32(v) => Self::F32(*v),
			Scalar::F64(v) => Self::F64(*v),
			Scalar::Decimal(v) => Self::Decimal(*v),
			_ => return None,
		};
		Some(number)
	}

	fn is_integer(&self) -> bool {
		matches!(self, Self::Int { .. } | Self::UInt { .. })
	}

	fn is_negative(&self) -> bool {
		match self {
			Self::Int { value, .. } => *value < 0,
			Self::UInt { .. } => false,
			Self::F32(v) => *v < 0.0,
			Self::F64(v) => *v < 0.0,
			Self::Decimal(v) => v.is_sign_negative() && !v.is_zero(),
		}
	}

	fn is_zero(&self) -> bool {
		match self {
			Self::Int { value, .. } => *value == 0,
			Self::UInt { value, .. } => *value == 0,
			Self::F32(v) => *v == 0.0,
			Self::F64(v) => *v == 0.0,
			Self::Decimal(v) => v.is_zero(),
		}
	}

	fn non_finite<'f>(&self, format: &'f NumberFormat) -> Option<&'f str> {
		let value = match self {
			Self::F32(v) => f64::from(*v),
			Self::F64(v) => *v,
			_ => return None,
		};
		if value.is_nan() {
			Some(format.nan_symbol)
		} else if value.is_infinite() {
			Some(if value > 0.0 { format.positive_infinity } else { format.negative_infinity })
		} else {
			None
		}
	}

	fn to_f64(self) -> f64 {
		match self {
			Self::Int { value, .. } => value as f64,
			Self::UInt { value, .. } => value as f64,
			Self::F32(v) => f64::from(v),
			Self::F64(v) => v,
			Self::Decimal(v) => v.to_f64().unwrap_or(0.0),
		}
	}

	fn times_hundred(self) -> Self {
		match self {
			Self::Int { value, bits } => match value.checked_mul(100) {
				Some(value) => Self::Int { value, bits },
				None => Self::F64(value as f64 * 100.0),
			},
			Self::UInt { value, bits } => match value.checked_mul(100) {
				Some(value) => Self::UInt { value, bits },
				None => Self::F64(value as f64 * 100.0),
			},
			Self::F32(v) => Self::F64(f64::from(v) * 100.0),
			Self::F64(v) => Self::F64(v * 100.0),
			Self::Decimal(v) => match v.checked_mul(Decimal::ONE_HUNDRED) {
				Some(value) => Self::Decimal(value),
				None => Self::F64(v.to_f64().unwrap_or(0.0) * 100.0),
			},
		}
	}

	/// Round to exactly `decimals` fraction digits.
	fn fixed(&self, decimals: usize) -> Digits {
		let (int, frac) = match self {
			Self::Int { value, .. } => (value.unsigned_abs().to_string(), "0".repeat(decimals)),
			Self::UInt { value, .. } => (value.to_string(), "0".repeat(decimals)),
			Self::F32(v) => split_point(&format!("{:.*}", decimals, v.abs())),
			Self::F64(v) => split_point(&format!("{:.*}", decimals, v.abs())),
			Self::Decimal(v) => {
				let dp = decimals.min(28) as u32;
				let rounded = v.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero).abs();
				let (int, mut frac) = split_point(&rounded.to_string());
				while frac.len() < decimals {
					frac.push('0');
				}
				(int, frac)
			}
		};
		let mut digits = Digits {
			negative: self.is_negative(),
			int,
			frac,
		};
		if digits.is_zero() {
			digits.negative = false;
		}
		digits
	}
}

fn split_point(text: &str) -> (String, String) {
	match text.split_once('.') {
		Some((int, frac)) => (int.to_owned(), frac.to_owned()),
		None => (text.to_owned(), String::new()),
	}
}

/// Render a number with an optional format string.
///
/// Standard formats are one letter plus an optional precision (`F2`, `N0`,
/// `D6`, `X8`, `E3`, `P1`); anything else is a custom pattern. Unsupported
/// standard letters fall back to the general form.
pub(crate) fn format_number(number: Number, format: Option<&str>, symbols: &NumberFormat, out: &mut String) {
	if let Some(text) = number.non_finite(symbols) {
		out.push_str(text);
		return;
	}

	let Some(format) = format.filter(|format| !format.is_empty()) else {
		write_general(number, symbols, out);
		return;
	};

	match parse_standard(format) {
		Some((letter, precision)) => write_standard(number, letter, precision, symbols, out),
		None => write_custom(number, format, symbols, out),
	}
}

fn parse_standard(format: &str) -> Option<(char, Option<usize>)> {
	let mut chars = format.chars();
	let letter = chars.next().filter(char::is_ascii_alphabetic)?;
	let rest = chars.as_str();
	if rest.is_empty() {
		return Some((letter, None));
	}
	if rest.len() > 2 || !rest.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	rest.parse::<usize>().ok().map(|precision| (letter, Some(precision)))
}

fn write_standard(number: Number, letter: char, precision: Option<usize>, symbols: &NumberFormat, out: &mut String) {
	match letter {
		'D' | 'd' if number.is_integer() => {
			let digits = number.fixed(0);
			if digits.negative {
				out.push_str(symbols.negative_sign);
			}
			pad_left_zeros(&digits.int, precision.unwrap_or(0), out);
		}
		'X' | 'x' if number.is_integer() => {
			let bits = match number {
				Number::Int { value, bits } => (value as u128) & mask(bits),
				Number::UInt { value, .. } => value,
				_ => 0,
			};
			let hex = if letter == 'X' { format!("{bits:X}") } else { format!("{bits:x}") };
			pad_left_zeros(&hex, precision.unwrap_or(0), out);
		}
		'F' | 'f' => write_digits(&number.fixed(precision.unwrap_or(2)), false, symbols, out),
		'N' | 'n' => write_digits(&number.fixed(precision.unwrap_or(2)), true, symbols, out),
		'P' | 'p' => {
			write_digits(&number.times_hundred().fixed(precision.unwrap_or(2)), true, symbols, out);
			out.push_str(symbols.percent_suffix);
		}
		'E' | 'e' => write_scientific(number, precision.unwrap_or(6), letter, 3, symbols, out),
		_ => write_general(number, symbols, out),
	}
}

fn mask(bits: u32) -> u128 {
	if bits >= 128 { u128::MAX } else { (1_u128 << bits) - 1 }
}

fn pad_left_zeros(digits: &str, width: usize, out: &mut String) {
	for _ in digits.len()..width {
		out.push('0');
	}
	out.push_str(digits);
}

fn write_digits(digits: &Digits, grouped: bool, symbols: &NumberFormat, out: &mut String) {
	if digits.negative {
		out.push_str(symbols.negative_sign);
	}
	if grouped {
		push_grouped(&digits.int, symbols.group_separator, out);
	} else {
		out.push_str(&digits.int);
	}
	if !digits.frac.is_empty() {
		out.push_str(symbols.decimal_separator);
		out.push_str(&digits.frac);
	}
}

fn push_grouped(int: &str, separator: &str, out: &mut String) {
	let len = int.len();
	for (idx, ch) in int.chars().enumerate() {
		if idx > 0 && (len - idx) % 3 == 0 {
			out.push_str(separator);
		}
		out.push(ch);
	}
}

/// Shortest round-trip form; floats switch to exponent notation outside `1e-4..1e15`.
fn write_general(number: Number, symbols: &NumberFormat, out: &mut String) {
	let (mantissa, exponent) = match number {
		Number::F32(v) => split_exponent(&format!("{:e}", v.abs())),
		Number::F64(v) => split_exponent(&format!("{:e}", v.abs())),
		Number::Decimal(v) => {
			let (int, frac) = split_point(&v.abs().to_string());
			let digits = Digits {
				negative: number.is_negative(),
				int,
				frac,
			};
			write_digits(&digits, false, symbols, out);
			return;
		}
		_ => {
			write_digits(&number.fixed(0), false, symbols, out);
			return;
		}
	};

	if number.is_zero() || (-4..15).contains(&exponent) {
		let text = match number {
			Number::F32(v) => v.abs().to_string(),
			_ => number.to_f64().abs().to_string(),
		};
		let (int, frac) = split_point(&text);
		let digits = Digits {
			negative: number.is_negative(),
			int,
			frac,
		};
		write_digits(&digits, false, symbols, out);
		return;
	}

	if number.is_negative() {
		out.push_str(symbols.negative_sign);
	}
	out.push_str(&mantissa.replace('.', symbols.decimal_separator));
	push_exponent(exponent, 'E', 2, symbols, out);
}

fn write_scientific(number: Number, precision: usize, letter: char, min_exponent_digits: usize, symbols: &NumberFormat, out: &mut String) {
	let (mantissa, exponent) = split_exponent(&format!("{:.*e}", precision, number.to_f64().abs()));
	let negative = number.is_negative() && mantissa.bytes().any(|byte| (b'1'..=b'9').contains(&byte));
	if negative {
		out.push_str(symbols.negative_sign);
	}
	out.push_str(&mantissa.replace('.', symbols.decimal_separator));
	push_exponent(exponent, letter, min_exponent_digits, symbols, out);
}

fn split_exponent(text: &str) -> (String, i32) {
	match text.split_once('e') {
		Some((mantissa, exponent)) => (mantissa.to_owned(), exponent.parse().unwrap_or(0)),
		None => (text.to_owned(), 0),
	}
}

fn push_exponent(exponent: i32, letter: char, min_digits: usize, symbols: &NumberFormat, out: &mut String) {
	out.push(letter);
	if exponent < 0 {
		out.push_str(symbols.negative_sign);
	} else {
		out.push('+');
	}
	pad_left_zeros(&exponent.unsigned_abs().to_string(), min_digits, out);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternItem {
	Zero,
	Hash,
	Point,
	Group,
	Percent,
	Literal(String),
}

impl PatternItem {
	fn is_digit(&self) -> bool {
		matches!(self, Self::Zero | Self::Hash)
	}
}

fn split_sections(pattern: &str) -> Vec<&str> {
	let mut sections = Vec::new();
	let mut start = 0;
	let mut quote: Option<char> = None;
	let mut escaped = false;
	for (idx, ch) in pattern.char_indices() {
		if escaped {
			escaped = false;
			continue;
		}
		match (quote, ch) {
			(Some(open), _) if ch == open => quote = None,
			(Some(_), _) => {}
			(None, '\\') => escaped = true,
			(None, '\'' | '"') => quote = Some(ch),
			(None, ';') => {
				sections.push(&pattern[start..idx]);
				start = idx + 1;
			}
			_ => {}
		}
	}
	sections.push(&pattern[start..]);
	sections
}

fn parse_pattern(section: &str) -> Vec<PatternItem> {
	let mut items = Vec::new();
	let mut chars = section.chars();
	let mut seen_point = false;
	while let Some(ch) = chars.next() {
		let item = match ch {
			'0' => PatternItem::Zero,
			'#' => PatternItem::Hash,
			'.' if !seen_point => {
				seen_point = true;
				PatternItem::Point
			}
			'.' => continue,
			',' => PatternItem::Group,
			'%' => PatternItem::Percent,
			'\\' => match chars.next() {
				Some(next) => PatternItem::Literal(next.to_string()),
				None => continue,
			},
			'\'' | '"' => {
				let literal: String = chars.by_ref().take_while(|next| *next != ch).collect();
				PatternItem::Literal(literal)
			}
			other => PatternItem::Literal(other.to_string()),
		};
		items.push(item);
	}
	items
}

fn write_custom(number: Number, pattern: &str, symbols: &NumberFormat, out: &mut String) {
	let sections = split_sections(pattern);
	let (section, explicit_sign) = if sections.len() >= 3 && number.is_zero() && !sections[2].is_empty() {
		(sections[2], true)
	} else if sections.len() >= 2 && number.is_negative() && !sections[1].is_empty() {
		(sections[1], true)
	} else {
		(sections[0], false)
	};

	let items = parse_pattern(section);
	let point_at = items.iter().position(|item| *item == PatternItem::Point).unwrap_or(items.len());
	let (int_items, frac_items) = items.split_at(point_at);

	let int_placeholders: Vec<&PatternItem> = int_items.iter().filter(|item| item.is_digit()).collect();
	let min_int = int_placeholders
		.iter()
		.position(|item| **item == PatternItem::Zero)
		.map_or(0, |first_zero| int_placeholders.len() - first_zero);
	let grouped = int_items.iter().enumerate().any(|(idx, item)| {
		*item == PatternItem::Group && int_items[..idx].iter().any(PatternItem::is_digit) && int_items[idx + 1..].iter().any(PatternItem::is_digit)
	});

	let frac_placeholders: Vec<&PatternItem> = frac_items.iter().filter(|item| item.is_digit()).collect();
	let max_frac = frac_placeholders.len();
	let min_frac = frac_placeholders.iter().rposition(|item| **item == PatternItem::Zero).map_or(0, |last| last + 1);

	let number = if items.contains(&PatternItem::Percent) { number.times_hundred() } else { number };
	let mut digits = number.fixed(max_frac);
	while digits.frac.len() > min_frac && digits.frac.ends_with('0') {
		digits.frac.pop();
	}

	let mut int = if digits.int == "0" { String::new() } else { digits.int.clone() };
	while int.len() < min_int {
		int.insert(0, '0');
	}
	let int = if grouped {
		let mut grouped_int = String::new();
		push_grouped(&int, symbols.group_separator, &mut grouped_int);
		grouped_int
	} else {
		int
	};

	if digits.negative && !explicit_sign {
		out.push_str(symbols.negative_sign);
	}

	let int_chars: Vec<char> = int.chars().collect();
	let placeholder_count = int_placeholders.len();
	let overflow = if grouped { int_chars.len() } else { int_chars.len().saturating_sub(placeholder_count) };
	let mut placeholder_idx = 0_usize;
	let mut frac_idx = 0_usize;
	let mut int_written = placeholder_count > 0;

	for (idx, item) in items.iter().enumerate() {
		let in_int = idx < point_at;
		match item {
			PatternItem::Zero | PatternItem::Hash if in_int => {
				if placeholder_idx == 0 {
					int_chars[..overflow].iter().for_each(|ch| out.push(*ch));
				}
				if !grouped {
					let slot = (int_chars.len() + placeholder_idx).checked_sub(placeholder_count);
					if let Some(slot) = slot.filter(|slot| *slot >= overflow && *slot < int_chars.len()) {
						out.push(int_chars[slot]);
					}
				}
				placeholder_idx += 1;
			}
			PatternItem::Zero | PatternItem::Hash => {
				if let Some(ch) = digits.frac.as_bytes().get(frac_idx) {
					out.push(char::from(*ch));
				}
				frac_idx += 1;
			}
			PatternItem::Point => {
				if !int_written {
					out.push_str(&int);
					int_written = true;
				}
				if !digits.frac.is_empty() {
					out.push_str(symbols.decimal_separator);
				}
			}
			PatternItem::Group => {}
			PatternItem::Percent => out.push_str(symbols.percent_symbol),
			PatternItem::Literal(text) => out.push_str(text),
		}
	}
}
