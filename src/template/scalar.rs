use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use url::Url;
use uuid::Uuid;

use crate::template::culture::provider_or_invariant;
use crate::template::datetime::{format_date, format_date_time, format_duration, format_time};
use crate::template::number::{Number, format_number};
use crate::template::FormatProvider;

/// Terminal captured value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Absent value.
	Null,
	/// Boolean.
	Bool(bool),
	/// Unicode scalar value.
	Char(char),
	/// Signed 8-bit integer.
	I8(i8),
	/// Signed 16-bit integer.
	I16(i16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Signed 64-bit integer.
	I64(i64),
	/// Signed 128-bit integer.
	I128(i128),
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// Unsigned 128-bit integer.
	U128(u128),
	/// Single-precision float.
	F32(f32),
	/// Double-precision float.
	F64(f64),
	/// Exact decimal number.
	Decimal(Decimal),
	/// Text.
	Str(String),
	/// Date and time without offset.
	DateTime(NaiveDateTime),
	/// Date and time with a fixed UTC offset.
	DateTimeOffset(DateTime<FixedOffset>),
	/// Calendar date.
	Date(NaiveDate),
	/// Time of day.
	Time(NaiveTime),
	/// Signed elapsed time.
	Duration(TimeDelta),
	/// Globally unique identifier.
	Uuid(Uuid),
	/// Absolute URI.
	Uri(Url),
	/// Raw byte buffer.
	Bytes(Vec<u8>),
	/// Enum member captured by name.
	Enum {
		/// Short enum type name.
		type_name: Box<str>,
		/// Variant name.
		variant: Box<str>,
	},
	/// Value of a caller-declared scalar type, captured through its text form.
	Other {
		/// Short runtime type name.
		type_name: Box<str>,
		/// Text form at capture time.
		text: Box<str>,
	},
}

impl Scalar {
	/// Whether this is [`Scalar::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Scalar::Null)
	}

	/// Borrow the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Scalar::Str(text) => Some(text),
			_ => None,
		}
	}

	/// Append the rendered scalar to `out`.
	///
	/// Strings are quoted unless the format is `l`; a custom formatter from
	/// the provider takes precedence over every other non-string rendering.
	pub fn render(&self, out: &mut String, format: Option<&str>, provider: Option<&dyn FormatProvider>) {
		match self {
			Scalar::Null => {
				out.push_str("null");
				return;
			}
			Scalar::Str(text) => {
				if format == Some("l") {
					out.push_str(text);
				} else {
					out.push('"');
					out.push_str(&text.replace('"', "\\\""));
					out.push('"');
				}
				return;
			}
			_ => {}
		}

		let provider = provider_or_invariant(provider);
		if let Some(text) = provider.custom_formatter().and_then(|custom| custom.format(format, self, provider)) {
			out.push_str(&text);
			return;
		}

		self.render_builtin(out, format, provider);
	}

	fn render_builtin(&self, out: &mut String, format: Option<&str>, provider: &dyn FormatProvider) {
		if let Some(number) = Number::from_scalar(self) {
			format_number(number, format, provider.number_format(), out);
			return;
		}

		let dates = provider.date_time_format();
		match self {
			Scalar::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
			Scalar::Char(value) => out.push(*value),
			Scalar::DateTime(value) => format_date_time(value, None, format, dates, out),
			Scalar::DateTimeOffset(value) => format_date_time(&value.naive_local(), Some(value.offset()), format, dates, out),
			Scalar::Date(value) => format_date(value, format, dates, out),
			Scalar::Time(value) => format_time(value, format, dates, out),
			Scalar::Duration(value) => format_duration(value, format, provider.number_format(), out),
			Scalar::Uuid(value) => push_uuid(value, format, out),
			Scalar::Uri(value) => out.push_str(value.as_str()),
			Scalar::Bytes(bytes) => push_hex(bytes, out),
			Scalar::Enum { variant, .. } => out.push_str(variant),
			Scalar::Other { text, .. } => out.push_str(text),
			_ => {}
		}
	}
}

fn push_uuid(value: &Uuid, format: Option<&str>, out: &mut String) {
	let text = match format {
		Some("N" | "n") => value.simple().to_string(),
		Some("B" | "b") => value.braced().to_string(),
		Some("P" | "p") => format!("({})", value.hyphenated()),
		_ => value.hyphenated().to_string(),
	};
	out.push_str(&text);
}

pub(crate) fn push_hex(bytes: &[u8], out: &mut String) {
	for byte in bytes {
		out.push_str(&format!("{byte:02X}"));
	}
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = String::new();
		self.render(&mut out, None, None);
		f.write_str(&out)
	}
}

impl Serialize for Scalar {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Scalar::Null => serializer.serialize_unit(),
			Scalar::Bool(v) => serializer.serialize_bool(*v),
			Scalar::Char(v) => serializer.serialize_char(*v),
			Scalar::I8(v) => serializer.serialize_i8(*v),
			Scalar::I16(v) => serializer.serialize_i16(*v),
			Scalar::I32(v) => serializer.serialize_i32(*v),
			Scalar::I64(v) => serializer.serialize_i64(*v),
			Scalar::I128(v) => serializer.serialize_i128(*v),
			Scalar::U8(v) => serializer.serialize_u8(*v),
			Scalar::U16(v) => serializer.serialize_u16(*v),
			Scalar::U32(v) => serializer.serialize_u32(*v),
			Scalar::U64(v) => serializer.serialize_u64(*v),
			Scalar::U128(v) => serializer.serialize_u128(*v),
			Scalar::F32(v) => serializer.serialize_f32(*v),
			Scalar::F64(v) => serializer.serialize_f64(*v),
			Scalar::Decimal(v) => serializer.collect_str(v),
			Scalar::Str(v) => serializer.serialize_str(v),
			Scalar::DateTime(v) => serializer.collect_str(&v.format("%Y-%m-%dT%H:%M:%S%.f")),
			Scalar::DateTimeOffset(v) => serializer.serialize_str(&v.to_rfc3339()),
			Scalar::Date(v) => serializer.collect_str(&v.format("%Y-%m-%d")),
			Scalar::Time(v) => serializer.collect_str(&v.format("%H:%M:%S%.f")),
			Scalar::Duration(_) | Scalar::Bytes(_) => serializer.serialize_str(&self.to_string()),
			Scalar::Uuid(v) => serializer.collect_str(&v.hyphenated()),
			Scalar::Uri(v) => serializer.serialize_str(v.as_str()),
			Scalar::Enum { variant, .. } => serializer.serialize_str(variant),
			Scalar::Other { text, .. } => serializer.serialize_str(text),
		}
	}
}

#[cfg(test)]
mod tests;
