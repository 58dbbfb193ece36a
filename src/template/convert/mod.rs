//! Conversion of captured runtime values into [`Value`] trees.

use std::any::TypeId;
use std::collections::HashSet;

use tracing::debug;

use crate::template::{
	AccessError, Capture, Destructuring, DictionaryValue, KeyType, Kind, MessageTemplate, Property, PropertyBinder, PropertyList, Result, Scalar, StructureValue,
	TemplateError, Value,
};

mod policy;

pub use policy::{DestructuringPolicy, MAX_CAPTURED_BYTES, PropertyValueFactory, ScalarConversionPolicy};
use policy::{ByteBufferScalarPolicy, EnumScalarPolicy, SimpleScalarPolicy};

/// Limits applied while capturing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
	/// Deepest nesting level converted; deeper values capture as `null`.
	pub max_depth: u32,
	/// Maximum number of sequence or dictionary items kept.
	pub max_collection_items: Option<usize>,
	/// Maximum captured string length in characters.
	pub max_string_len: Option<usize>,
}

impl Default for CaptureOptions {
	fn default() -> Self {
		Self {
			max_depth: 10,
			max_collection_items: None,
			max_string_len: None,
		}
	}
}

impl CaptureOptions {
	/// Tight limits for capturing untrusted values in diagnostics.
	pub fn for_diagnostics() -> Self {
		Self {
			max_depth: 4,
			max_collection_items: Some(64),
			max_string_len: Some(1024),
		}
	}
}

/// Builder for [`Converter`].
#[derive(Default)]
pub struct ConverterBuilder {
	options: CaptureOptions,
	scalar_types: HashSet<TypeId>,
	destructuring_policies: Vec<Box<dyn DestructuringPolicy>>,
}

impl ConverterBuilder {
	/// Replace all capture limits.
	pub fn options(mut self, options: CaptureOptions) -> Self {
		self.options = options;
		self
	}

	/// Set the maximum nesting depth; must be at least 1.
	pub fn max_depth(mut self, max_depth: u32) -> Self {
		self.options.max_depth = max_depth;
		self
	}

	/// Cap the number of items kept per sequence or dictionary.
	pub fn max_collection_items(mut self, limit: Option<usize>) -> Self {
		self.options.max_collection_items = limit;
		self
	}

	/// Cap captured string length.
	pub fn max_string_len(mut self, limit: Option<usize>) -> Self {
		self.options.max_string_len = limit;
		self
	}

	/// Capture values of type `T` as scalars through their text form.
	pub fn scalar_type<T: Capture>(mut self) -> Self {
		self.scalar_types.insert(TypeId::of::<T>());
		self
	}

	/// Add a destructuring policy, consulted before the built-in rules.
	pub fn destructuring_policy(mut self, policy: impl DestructuringPolicy + 'static) -> Self {
		self.destructuring_policies.push(Box::new(policy));
		self
	}

	/// Validate the configuration and build the converter.
	pub fn build(self) -> Result<Converter> {
		if self.options.max_depth == 0 {
			return Err(TemplateError::InvalidMaxDepth {
				max_depth: self.options.max_depth,
			});
		}
		Ok(Converter::assemble(self.options, self.scalar_types, self.destructuring_policies))
	}
}

/// Policy-driven converter from [`Capture`] values to [`Value`] trees.
pub struct Converter {
	options: CaptureOptions,
	scalar_types: HashSet<TypeId>,
	scalar_policies: Vec<Box<dyn ScalarConversionPolicy>>,
	destructuring_policies: Vec<Box<dyn DestructuringPolicy>>,
}

impl Default for Converter {
	fn default() -> Self {
		Self::assemble(CaptureOptions::default(), HashSet::new(), Vec::new())
	}
}

impl Converter {
	fn assemble(options: CaptureOptions, scalar_types: HashSet<TypeId>, destructuring_policies: Vec<Box<dyn DestructuringPolicy>>) -> Self {
		let scalar_policies: Vec<Box<dyn ScalarConversionPolicy>> = vec![
			Box::new(SimpleScalarPolicy {
				scalar_types: scalar_types.clone(),
			}),
			Box::new(EnumScalarPolicy),
			Box::new(ByteBufferScalarPolicy),
		];
		Self {
			options,
			scalar_types,
			scalar_policies,
			destructuring_policies,
		}
	}

	/// Start configuring a converter.
	pub fn builder() -> ConverterBuilder {
		ConverterBuilder::default()
	}

	/// Converter with the given limits and no extra policies.
	pub fn new(options: CaptureOptions) -> Result<Self> {
		Self::builder().options(options).build()
	}

	/// Active capture limits.
	pub fn options(&self) -> &CaptureOptions {
		&self.options
	}

	/// Bind `values` to the template's properties and convert them.
	pub fn capture(&self, template: &MessageTemplate, values: &[&dyn Capture]) -> PropertyList {
		PropertyBinder::new(self).construct_properties(template, values)
	}

	fn convert(&self, value: &dyn Capture, destructuring: Destructuring, depth: u32) -> Value {
		let kind = value.kind();
		if matches!(kind, Kind::Null | Kind::Optional(None)) {
			return Value::null();
		}

		if destructuring == Destructuring::Stringify {
			return Value::Scalar(Scalar::Str(self.limit_string(value.to_text())));
		}

		// `Some` adds no nesting: the inner value converts at the same depth.
		if let Kind::Optional(Some(inner)) = kind {
			return self.convert(inner, destructuring, depth);
		}

		let limiter = DepthLimiter { converter: self, depth };

		for policy in &self.scalar_policies {
			if let Some(scalar) = policy.try_convert_to_scalar(value, &limiter) {
				return Value::Scalar(self.limit_scalar(scalar));
			}
		}

		if destructuring == Destructuring::Destructure {
			for policy in &self.destructuring_policies {
				if let Some(result) = policy.try_destructure(value, &limiter) {
					return result;
				}
			}
			if matches!(kind, Kind::Callable) {
				return Value::Scalar(Scalar::Str(self.limit_string(value.to_text())));
			}
		}

		match kind {
			Kind::Mapping(key_type, entries) => self.convert_mapping(key_type, entries, destructuring, &limiter),
			Kind::Sequence(items) => {
				let elements = items
					.take(self.collection_limit())
					.map(|item| limiter.create_property_value(item, destructuring))
					.collect();
				Value::Sequence(elements)
			}
			Kind::Object(members) if destructuring == Destructuring::Destructure => {
				let properties = members.map(|member| self.convert_member(member.name(), member.value(), &limiter)).collect();
				Value::Structure(StructureValue::new(Some(value.type_name()), properties))
			}
			_ if destructuring == Destructuring::Destructure => Value::Structure(StructureValue::new(Some(value.type_name()), Vec::new())),
			_ => Value::Scalar(Scalar::Str(self.limit_string(value.to_text()))),
		}
	}

	fn convert_member(&self, name: &str, value: std::result::Result<&dyn Capture, &AccessError>, limiter: &DepthLimiter<'_>) -> Property {
		match value {
			Ok(value) => Property::new(name, limiter.create_property_value(value, Destructuring::Destructure)),
			Err(err) => {
				debug!(property = name, error = %err, "property accessor failed during capture");
				Property::new(name, Value::string(format!("The property accessor failed: {err}")))
			}
		}
	}

	fn convert_mapping<'a>(
		&self,
		key_type: KeyType,
		entries: Box<dyn Iterator<Item = (&'a dyn Capture, &'a dyn Capture)> + 'a>,
		destructuring: Destructuring,
		limiter: &DepthLimiter<'_>,
	) -> Value {
		let entries: Vec<(&dyn Capture, &dyn Capture)> = entries.take(self.collection_limit()).collect();

		if self.is_scalar_key(key_type) {
			let dictionary = entries
				.into_iter()
				.map(|(key, value)| {
					let key = match limiter.create_property_value(key, destructuring) {
						Value::Scalar(scalar) => scalar,
						_ => {
							debug!(key_type = key.type_name(), "dictionary key did not convert to a scalar");
							Scalar::Str(key.to_text())
						}
					};
					(key, limiter.create_property_value(value, destructuring))
				})
				.collect::<DictionaryValue>();
			return Value::Dictionary(dictionary);
		}

		let elements = entries
			.into_iter()
			.map(|(key, value)| {
				if destructuring == Destructuring::Destructure {
					let properties = vec![
						Property::new("key", limiter.create_property_value(key, destructuring)),
						Property::new("value", limiter.create_property_value(value, destructuring)),
					];
					Value::Structure(StructureValue::new(None, properties))
				} else {
					Value::Scalar(Scalar::Str(self.limit_string(format!("[{}, {}]", key.to_text(), value.to_text()))))
				}
			})
			.collect();
		Value::Sequence(elements)
	}

	fn is_scalar_key(&self, key_type: KeyType) -> bool {
		key_type.scalar || self.scalar_types.contains(&key_type.type_id)
	}

	fn collection_limit(&self) -> usize {
		self.options.max_collection_items.unwrap_or(usize::MAX)
	}

	fn limit_string(&self, text: String) -> String {
		match self.options.max_string_len {
			Some(limit) if text.chars().count() > limit => {
				let mut truncated: String = text.chars().take(limit.saturating_sub(1)).collect();
				truncated.push('…');
				truncated
			}
			_ => text,
		}
	}

	fn limit_scalar(&self, scalar: Scalar) -> Scalar {
		match scalar {
			Scalar::Str(text) => Scalar::Str(self.limit_string(text)),
			other => other,
		}
	}
}

impl PropertyValueFactory for Converter {
	/// Convert at the entry depth.
	fn create_property_value(&self, value: &dyn Capture, destructuring: Destructuring) -> Value {
		self.convert(value, destructuring, 1)
	}
}

/// Factory handed to policies and nested conversions; each call is one level deeper.
struct DepthLimiter<'c> {
	converter: &'c Converter,
	depth: u32,
}

impl PropertyValueFactory for DepthLimiter<'_> {
	fn create_property_value(&self, value: &dyn Capture, destructuring: Destructuring) -> Value {
		if self.depth >= self.converter.options.max_depth {
			debug!(
				max_depth = self.converter.options.max_depth,
				value_type = value.type_name(),
				"maximum capture depth reached"
			);
			return Value::null();
		}
		self.converter.convert(value, destructuring, self.depth + 1)
	}
}

#[cfg(test)]
mod tests;
