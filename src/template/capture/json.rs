use serde_json::{Number, Value as Json};

use super::{Capture, Kind, Member};
use crate::template::Scalar;

fn number_scalar(number: &Number) -> Scalar {
	if let Some(value) = number.as_i64() {
		Scalar::I64(value)
	} else if let Some(value) = number.as_u64() {
		Scalar::U64(value)
	} else {
		Scalar::F64(number.as_f64().unwrap_or(f64::NAN))
	}
}

/// JSON objects capture as untagged objects, so `@` renders `{ a: 1 }`.
impl Capture for Json {
	fn kind(&self) -> Kind<'_> {
		match self {
			Json::Null => Kind::Null,
			Json::Bool(value) => Kind::Scalar(Scalar::Bool(*value)),
			Json::Number(number) => Kind::Scalar(number_scalar(number)),
			Json::String(text) => Kind::Scalar(Scalar::Str(text.clone())),
			Json::Array(items) => Kind::Sequence(Box::new(items.iter().map(|item| item as &dyn Capture))),
			Json::Object(map) => Kind::Object(Box::new(map.iter().map(|(name, value)| Member::new(name, value)))),
		}
	}

	fn type_name(&self) -> &'static str {
		""
	}

	fn to_text(&self) -> String {
		match self {
			Json::String(text) => text.clone(),
			other => other.to_string(),
		}
	}
}
