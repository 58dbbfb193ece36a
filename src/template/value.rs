use std::collections::HashMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::template::{FormatProvider, Scalar};

/// Structured value produced by capturing a runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Terminal value.
	Scalar(Scalar),
	/// Ordered elements.
	Sequence(Vec<Value>),
	/// Scalar-keyed entries.
	Dictionary(DictionaryValue),
	/// Named properties with an optional type tag.
	Structure(StructureValue),
}

impl Value {
	/// `Scalar(Null)`.
	pub const fn null() -> Self {
		Self::Scalar(Scalar::Null)
	}

	/// Shorthand for a string scalar.
	pub fn string(text: impl Into<String>) -> Self {
		Self::Scalar(Scalar::Str(text.into()))
	}

	/// Scalar payload, if any.
	pub fn as_scalar(&self) -> Option<&Scalar> {
		match self {
			Self::Scalar(scalar) => Some(scalar),
			_ => None,
		}
	}

	/// Whether this is `Scalar(Null)`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Scalar(Scalar::Null))
	}

	/// Append the rendered value to `out`.
	///
	/// Sequences forward `format` to their elements; dictionary and
	/// structure members always render without a format.
	pub fn render(&self, out: &mut String, format: Option<&str>, provider: Option<&dyn FormatProvider>) {
		match self {
			Self::Scalar(scalar) => scalar.render(out, format, provider),
			Self::Sequence(elements) => {
				out.push('[');
				for (idx, element) in elements.iter().enumerate() {
					if idx > 0 {
						out.push_str(", ");
					}
					element.render(out, format, provider);
				}
				out.push(']');
			}
			Self::Dictionary(dictionary) => dictionary.render(out, provider),
			Self::Structure(structure) => structure.render(out, provider),
		}
	}
}

impl From<Scalar> for Value {
	fn from(scalar: Scalar) -> Self {
		Self::Scalar(scalar)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = String::new();
		self.render(&mut out, None, None);
		f.write_str(&out)
	}
}

/// Ordered dictionary with unique scalar keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DictionaryValue {
	entries: Vec<(Scalar, Value)>,
}

impl DictionaryValue {
	/// Empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert an entry; a repeated key replaces the earlier value in place.
	pub fn insert(&mut self, key: Scalar, value: Value) {
		match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((key, value)),
		}
	}

	/// Value stored under `key`.
	pub fn get(&self, key: &Scalar) -> Option<&Value> {
		self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Entries in insertion order.
	pub fn entries(&self) -> &[(Scalar, Value)] {
		&self.entries
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the dictionary has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn render(&self, out: &mut String, provider: Option<&dyn FormatProvider>) {
		out.push('[');
		for (idx, (key, value)) in self.entries.iter().enumerate() {
			out.push_str(if idx == 0 { "(" } else { ", (" });
			key.render(out, None, provider);
			out.push_str(": ");
			value.render(out, None, provider);
			out.push(')');
		}
		out.push(']');
	}
}

impl FromIterator<(Scalar, Value)> for DictionaryValue {
	fn from_iter<I: IntoIterator<Item = (Scalar, Value)>>(iter: I) -> Self {
		let mut dictionary = Self::new();
		for (key, value) in iter {
			dictionary.insert(key, value);
		}
		dictionary
	}
}

/// Object captured property by property.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureValue {
	type_tag: Option<Box<str>>,
	properties: Vec<Property>,
}

impl StructureValue {
	/// Create a structure; a tag that does not start with a letter is dropped.
	pub fn new(type_tag: Option<&str>, properties: Vec<Property>) -> Self {
		let type_tag = type_tag.filter(|tag| tag.chars().next().is_some_and(char::is_alphabetic)).map(Into::into);
		Self { type_tag, properties }
	}

	/// Type tag rendered before the braces.
	pub fn type_tag(&self) -> Option<&str> {
		self.type_tag.as_deref()
	}

	/// Properties in capture order.
	pub fn properties(&self) -> &[Property] {
		&self.properties
	}

	fn render(&self, out: &mut String, provider: Option<&dyn FormatProvider>) {
		if let Some(tag) = &self.type_tag {
			out.push_str(tag);
			out.push(' ');
		}
		if self.properties.is_empty() {
			out.push_str("{ }");
			return;
		}
		out.push_str("{ ");
		for (idx, property) in self.properties.iter().enumerate() {
			if idx > 0 {
				out.push_str(", ");
			}
			out.push_str(&property.name);
			out.push_str(": ");
			property.value.render(out, None, provider);
		}
		out.push_str(" }");
	}
}

/// Named captured value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
	/// Property name.
	pub name: Box<str>,
	/// Captured value.
	pub value: Value,
}

impl Property {
	/// Create a property.
	pub fn new(name: impl Into<Box<str>>, value: Value) -> Self {
		Self { name: name.into(), value }
	}
}

/// Properties in capture order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyList(Vec<Property>);

impl PropertyList {
	/// Empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a property.
	pub fn push(&mut self, property: Property) {
		self.0.push(property);
	}

	/// First property named `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.iter().find(|property| &*property.name == name).map(|property| &property.value)
	}

	/// Properties in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Property> {
		self.0.iter()
	}

	/// Properties as a slice.
	pub fn as_slice(&self) -> &[Property] {
		&self.0
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the list is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Name lookup over the list.
	pub fn to_map(&self) -> PropertyMap<'_> {
		PropertyMap::new(&self.0)
	}
}

impl From<Vec<Property>> for PropertyList {
	fn from(properties: Vec<Property>) -> Self {
		Self(properties)
	}
}

impl FromIterator<Property> for PropertyList {
	fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for PropertyList {
	type Item = Property;
	type IntoIter = std::vec::IntoIter<Property>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a PropertyList {
	type Item = &'a Property;
	type IntoIter = std::slice::Iter<'a, Property>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Name-to-value lookup; when names repeat the first property wins.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap<'a> {
	by_name: HashMap<&'a str, &'a Value>,
}

impl<'a> PropertyMap<'a> {
	/// Index `properties` by name.
	pub fn new(properties: &'a [Property]) -> Self {
		let mut by_name = HashMap::with_capacity(properties.len());
		for property in properties {
			by_name.entry(&*property.name).or_insert(&property.value);
		}
		Self { by_name }
	}

	/// Value bound to `name`.
	pub fn get(&self, name: &str) -> Option<&'a Value> {
		self.by_name.get(name).copied()
	}

	/// Number of distinct names.
	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	/// Whether no names are bound.
	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}

fn key_text(key: &Scalar) -> String {
	match key {
		Scalar::Str(text) => text.clone(),
		other => other.to_string(),
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Scalar(scalar) => scalar.serialize(serializer),
			Self::Sequence(elements) => {
				let mut seq = serializer.serialize_seq(Some(elements.len()))?;
				for element in elements {
					seq.serialize_element(element)?;
				}
				seq.end()
			}
			Self::Dictionary(dictionary) => {
				let mut map = serializer.serialize_map(Some(dictionary.len()))?;
				for (key, value) in dictionary.entries() {
					map.serialize_entry(&key_text(key), value)?;
				}
				map.end()
			}
			Self::Structure(structure) => {
				let tagged = usize::from(structure.type_tag.is_some());
				let mut map = serializer.serialize_map(Some(structure.properties.len() + tagged))?;
				if let Some(tag) = structure.type_tag() {
					map.serialize_entry("$type", tag)?;
				}
				for property in &structure.properties {
					map.serialize_entry(&*property.name, &property.value)?;
				}
				map.end()
			}
		}
	}
}

impl Serialize for PropertyList {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for property in &self.0 {
			map.serialize_entry(&*property.name, &property.value)?;
		}
		map.end()
	}
}
