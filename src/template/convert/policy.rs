use std::any::TypeId;
use std::collections::HashSet;

use crate::template::scalar::push_hex;
use crate::template::{Capture, Destructuring, Kind, Scalar, Value};

/// Byte buffers longer than this are summarized instead of captured whole.
pub const MAX_CAPTURED_BYTES: usize = 1024;
const SUMMARY_BYTES: usize = 16;

/// Converts nested values on behalf of a policy, one level deeper.
pub trait PropertyValueFactory {
	/// Convert `value` with the given destructuring mode.
	fn create_property_value(&self, value: &dyn Capture, destructuring: Destructuring) -> Value;
}

/// Claims values that should be captured as scalars.
pub trait ScalarConversionPolicy: Send + Sync {
	/// Scalar form of `value`, or `None` to let the next policy try.
	fn try_convert_to_scalar(&self, value: &dyn Capture, factory: &dyn PropertyValueFactory) -> Option<Scalar>;
}

/// Claims values that should be expanded in a specific way under `@`.
pub trait DestructuringPolicy: Send + Sync {
	/// Structured form of `value`, or `None` to let the next policy try.
	fn try_destructure(&self, value: &dyn Capture, factory: &dyn PropertyValueFactory) -> Option<Value>;
}

impl<F> DestructuringPolicy for F
where
	F: Fn(&dyn Capture, &dyn PropertyValueFactory) -> Option<Value> + Send + Sync,
{
	fn try_destructure(&self, value: &dyn Capture, factory: &dyn PropertyValueFactory) -> Option<Value> {
		self(value, factory)
	}
}

/// Primitive payloads plus caller-declared scalar types.
pub(crate) struct SimpleScalarPolicy {
	pub(crate) scalar_types: HashSet<TypeId>,
}

impl ScalarConversionPolicy for SimpleScalarPolicy {
	fn try_convert_to_scalar(&self, value: &dyn Capture, _factory: &dyn PropertyValueFactory) -> Option<Scalar> {
		if let Kind::Scalar(scalar) = value.kind() {
			return Some(scalar);
		}
		if self.scalar_types.contains(&value.runtime_type()) {
			return Some(Scalar::Other {
				type_name: value.type_name().into(),
				text: value.to_text().into(),
			});
		}
		None
	}
}

pub(crate) struct EnumScalarPolicy;

impl ScalarConversionPolicy for EnumScalarPolicy {
	fn try_convert_to_scalar(&self, value: &dyn Capture, _factory: &dyn PropertyValueFactory) -> Option<Scalar> {
		let Kind::Enum(variant) = value.kind() else {
			return None;
		};
		Some(Scalar::Enum {
			type_name: value.type_name().into(),
			variant: variant.into(),
		})
	}
}

pub(crate) struct ByteBufferScalarPolicy;

impl ScalarConversionPolicy for ByteBufferScalarPolicy {
	fn try_convert_to_scalar(&self, value: &dyn Capture, _factory: &dyn PropertyValueFactory) -> Option<Scalar> {
		let Kind::Bytes(bytes) = value.kind() else {
			return None;
		};
		if bytes.len() <= MAX_CAPTURED_BYTES {
			return Some(Scalar::Bytes(bytes.into_owned()));
		}
		let mut summary = String::new();
		push_hex(&bytes[..SUMMARY_BYTES], &mut summary);
		summary.push_str(&format!("... ({} bytes)", bytes.len()));
		Some(Scalar::Str(summary))
	}
}
