//! Runtime values as seen by the conversion engine.
//!
//! A [`Capture`] value reports its shape through [`Kind`]; object members
//! are produced lazily and may borrow from the value, own a freshly built
//! child, or fail with an [`AccessError`].

use std::any::TypeId;
use std::borrow::Cow;

use crate::template::{AccessError, Scalar};

mod impls;
mod json;

/// Value that can be captured into a structured property.
pub trait Capture: 'static {
	/// Shape of the value.
	fn kind(&self) -> Kind<'_>;

	/// Short runtime type name, used as the structure type tag.
	fn type_name(&self) -> &'static str {
		short_type_name(std::any::type_name::<Self>())
	}

	/// Runtime type used to match declared scalar types.
	fn runtime_type(&self) -> TypeId {
		TypeId::of::<Self>()
	}

	/// Text form used by `$` captures and non-destructured fallbacks.
	fn to_text(&self) -> String {
		self.type_name().to_owned()
	}

	/// Whether every value of this type captures as a scalar.
	///
	/// Mappings keyed by such a type become dictionaries, empty ones included.
	fn scalar_type() -> bool
	where
		Self: Sized,
	{
		false
	}
}

/// Type-level description of a mapping's keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyType {
	/// Key type, matched against declared scalar types.
	pub type_id: TypeId,
	/// Whether keys of this type always capture as scalars.
	pub scalar: bool,
}

impl KeyType {
	/// Describe the key type `K`.
	pub fn of<K: Capture>() -> Self {
		Self {
			type_id: TypeId::of::<K>(),
			scalar: K::scalar_type(),
		}
	}
}

/// Shape of a captured value.
pub enum Kind<'a> {
	/// Absent value.
	Null,
	/// Primitive payload.
	Scalar(Scalar),
	/// Optional wrapper.
	Optional(Option<&'a dyn Capture>),
	/// Enum member, by variant name.
	Enum(&'a str),
	/// Byte buffer.
	Bytes(Cow<'a, [u8]>),
	/// Function-like value; never destructured.
	Callable,
	/// Key/value mapping; the key type decides whether it forms a dictionary.
	Mapping(KeyType, Box<dyn Iterator<Item = (&'a dyn Capture, &'a dyn Capture)> + 'a>),
	/// Ordered elements.
	Sequence(Box<dyn Iterator<Item = &'a dyn Capture> + 'a>),
	/// Named members.
	Object(Box<dyn Iterator<Item = Member<'a>> + 'a>),
	/// Value with no inspectable shape; captured through its text.
	Opaque,
}

/// Member value, borrowed from the parent or built on access.
pub enum MemberValue<'a> {
	/// Borrowed from the parent value.
	Ref(&'a dyn Capture),
	/// Computed when the member was read.
	Owned(Box<dyn Capture>),
}

impl MemberValue<'_> {
	/// Borrow the member as a capture.
	pub fn as_capture(&self) -> &dyn Capture {
		match self {
			Self::Ref(value) => *value,
			Self::Owned(value) => value.as_ref(),
		}
	}
}

/// Named member of an object.
pub struct Member<'a> {
	name: &'a str,
	value: Result<MemberValue<'a>, AccessError>,
}

impl<'a> Member<'a> {
	/// Member borrowing its value from the parent.
	pub fn new(name: &'a str, value: &'a dyn Capture) -> Self {
		Self {
			name,
			value: Ok(MemberValue::Ref(value)),
		}
	}

	/// Member whose value is computed on access.
	pub fn owned(name: &'a str, value: impl Capture) -> Self {
		Self {
			name,
			value: Ok(MemberValue::Owned(Box::new(value))),
		}
	}

	/// Member whose accessor failed.
	pub fn failed(name: &'a str, error: AccessError) -> Self {
		Self { name, value: Err(error) }
	}

	/// Member name.
	pub fn name(&self) -> &'a str {
		self.name
	}

	/// Member value or the accessor failure.
	pub fn value(&self) -> Result<&dyn Capture, &AccessError> {
		self.value.as_ref().map(MemberValue::as_capture)
	}
}

/// Last path segment of a type name, without generic arguments.
///
/// Tuple, slice, array and reference types are returned unchanged.
pub fn short_type_name(full: &'static str) -> &'static str {
	if full.starts_with(['(', '[', '&', '*']) {
		return full;
	}
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

/// Implement [`Capture`] for a struct by listing the fields to expose.
///
/// ```
/// use msgtemplate::capture_struct;
///
/// struct Chair {
/// 	back: String,
/// 	legs: Vec<i32>,
/// }
///
/// capture_struct!(Chair { back, legs });
/// ```
#[macro_export]
macro_rules! capture_struct {
	($ty:ty { $($field:ident),* $(,)? }) => {
		impl $crate::template::Capture for $ty {
			fn kind(&self) -> $crate::template::Kind<'_> {
				let members: ::std::vec::Vec<$crate::template::Member<'_>> =
					::std::vec![$($crate::template::Member::new(::std::stringify!($field), &self.$field)),*];
				$crate::template::Kind::Object(::std::boxed::Box::new(members.into_iter()))
			}
		}
	};
}

/// Implement [`Capture`] for a fieldless enum by listing its variants.
///
/// ```
/// use msgtemplate::capture_enum;
///
/// enum Size {
/// 	Large,
/// 	Small,
/// }
///
/// capture_enum!(Size { Large, Small });
/// ```
#[macro_export]
macro_rules! capture_enum {
	($ty:ty { $($variant:ident),* $(,)? }) => {
		impl $crate::template::Capture for $ty {
			fn kind(&self) -> $crate::template::Kind<'_> {
				let variant = match self {
					$(Self::$variant => ::std::stringify!($variant),)*
				};
				$crate::template::Kind::Enum(variant)
			}

			fn to_text(&self) -> ::std::string::String {
				match self {
					$(Self::$variant => ::std::stringify!($variant).to_owned(),)*
				}
			}

			fn scalar_type() -> bool {
				true
			}
		}
	};
}
