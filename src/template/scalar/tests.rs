use chrono::{NaiveDate, TimeDelta};
use uuid::Uuid;

use super::*;
use crate::template::{Culture, CustomFormatter, DateTimeFormat, NumberFormat};

fn render(scalar: &Scalar, format: Option<&str>, provider: Option<&dyn FormatProvider>) -> String {
	let mut out = String::new();
	scalar.render(&mut out, format, provider);
	out
}

#[test]
fn strings_are_quoted_unless_literal() {
	let text = Scalar::Str("say \"hi\"".into());
	assert_eq!(render(&text, None, None), "\"say \\\"hi\\\"\"");
	assert_eq!(render(&text, Some("l"), None), "say \"hi\"");
	assert_eq!(text.as_str(), Some("say \"hi\""));
}

#[test]
fn null_and_bool_have_fixed_forms() {
	assert_eq!(render(&Scalar::Null, Some("X"), None), "null");
	assert!(Scalar::Null.is_null());
	assert_eq!(render(&Scalar::Bool(true), None, None), "true");
	assert_eq!(render(&Scalar::Bool(false), None, None), "false");
	assert_eq!(render(&Scalar::Char('x'), None, None), "x");
}

#[test]
fn numbers_follow_the_provider() {
	let fr = Culture::fr_fr();
	assert_eq!(render(&Scalar::F64(12.345), None, Some(&fr)), "12,345");
	assert_eq!(render(&Scalar::F64(12.345), None, None), "12.345");
	assert_eq!(render(&Scalar::I32(7), Some("000"), None), "007");
}

#[test]
fn identifiers_bytes_and_names() {
	let id = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
	assert_eq!(render(&Scalar::Uuid(id), None, None), "01234567-89ab-cdef-0123-456789abcdef");
	assert_eq!(render(&Scalar::Uuid(id), Some("N"), None), "0123456789abcdef0123456789abcdef");
	assert_eq!(render(&Scalar::Uuid(id), Some("B"), None), "{01234567-89ab-cdef-0123-456789abcdef}");
	assert_eq!(render(&Scalar::Uuid(id), Some("P"), None), "(01234567-89ab-cdef-0123-456789abcdef)");

	assert_eq!(render(&Scalar::Bytes(vec![0x0a, 0xff, 0x10]), None, None), "0AFF10");

	let size = Scalar::Enum {
		type_name: "Size".into(),
		variant: "Large".into(),
	};
	assert_eq!(render(&size, None, None), "Large");

	let other = Scalar::Other {
		type_name: "Point".into(),
		text: "(1, 2)".into(),
	};
	assert_eq!(render(&other, None, None), "(1, 2)");
}

#[test]
fn dates_and_durations_render_with_culture() {
	let when = NaiveDate::from_ymd_opt(2013, 5, 20).and_then(|date| date.and_hms_opt(16, 39, 0)).expect("valid date");
	assert_eq!(render(&Scalar::DateTime(when), None, Some(&Culture::fr_fr())), "20/05/2013 16:39:00");
	assert_eq!(render(&Scalar::Date(when.date()), Some("yyyy"), None), "2013");
	assert_eq!(render(&Scalar::Duration(TimeDelta::minutes(90)), None, None), "01:30:00");
}

struct Shouting {
	culture: Culture,
}

struct ShoutingFormatter;

impl CustomFormatter for ShoutingFormatter {
	fn format(&self, format: Option<&str>, value: &Scalar, _provider: &dyn FormatProvider) -> Option<String> {
		match (format, value) {
			(Some("loud"), Scalar::I32(v)) => Some(format!("{v}!")),
			_ => None,
		}
	}
}

impl FormatProvider for Shouting {
	fn number_format(&self) -> &NumberFormat {
		self.culture.number_format()
	}

	fn date_time_format(&self) -> &DateTimeFormat {
		self.culture.date_time_format()
	}

	fn custom_formatter(&self) -> Option<&dyn CustomFormatter> {
		Some(&ShoutingFormatter)
	}
}

#[test]
fn custom_formatter_takes_precedence_and_may_decline() {
	let provider = Shouting { culture: Culture::invariant() };
	assert_eq!(render(&Scalar::I32(3), Some("loud"), Some(&provider)), "3!");
	assert_eq!(render(&Scalar::I32(3), Some("00"), Some(&provider)), "03");
	assert_eq!(render(&Scalar::Str("quiet".into()), Some("loud"), Some(&provider)), "\"quiet\"");
}

#[test]
fn display_uses_invariant_rendering() {
	assert_eq!(Scalar::F64(1.5).to_string(), "1.5");
	assert_eq!(Scalar::Str("a".into()).to_string(), "\"a\"");
}

#[test]
fn serializes_to_natural_json() {
	let json = |scalar: Scalar| serde_json::to_value(scalar).expect("serialize scalar");
	assert_eq!(json(Scalar::Null), serde_json::Value::Null);
	assert_eq!(json(Scalar::I64(-3)), serde_json::json!(-3));
	assert_eq!(json(Scalar::Str("x".into())), serde_json::json!("x"));
	assert_eq!(json(Scalar::Bytes(vec![1, 2])), serde_json::json!("0102"));
	assert_eq!(json(Scalar::Decimal("1.50".parse().expect("decimal"))), serde_json::json!("1.50"));
	let date = NaiveDate::from_ymd_opt(2020, 1, 2).expect("valid date");
	assert_eq!(json(Scalar::Date(date)), serde_json::json!("2020-01-02"));
}
