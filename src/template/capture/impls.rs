use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use super::{Capture, KeyType, Kind, Member};
use crate::template::Scalar;

macro_rules! capture_copy_scalar {
	($($ty:ty => $variant:ident),* $(,)?) => {$(
		impl Capture for $ty {
			fn kind(&self) -> Kind<'_> {
				Kind::Scalar(Scalar::$variant(*self))
			}

			fn to_text(&self) -> String {
				self.to_string()
			}

			fn scalar_type() -> bool {
				true
			}
		}
	)*};
}

capture_copy_scalar!(
	bool => Bool,
	char => Char,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	i128 => I128,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	u128 => U128,
	f32 => F32,
	f64 => F64,
	Decimal => Decimal,
	NaiveDateTime => DateTime,
	NaiveDate => Date,
	NaiveTime => Time,
	Uuid => Uuid,
);

impl Capture for isize {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::I64(*self as i64))
	}

	fn to_text(&self) -> String {
		self.to_string()
	}

	fn scalar_type() -> bool {
		true
	}
}

impl Capture for usize {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::U64(*self as u64))
	}

	fn to_text(&self) -> String {
		self.to_string()
	}

	fn scalar_type() -> bool {
		true
	}
}

impl Capture for TimeDelta {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::Duration(*self))
	}

	fn to_text(&self) -> String {
		Scalar::Duration(*self).to_string()
	}

	fn scalar_type() -> bool {
		true
	}
}

impl Capture for std::time::Duration {
	fn kind(&self) -> Kind<'_> {
		match TimeDelta::from_std(*self) {
			Ok(delta) => Kind::Scalar(Scalar::Duration(delta)),
			Err(_) => Kind::Scalar(Scalar::Str(format!("{self:?}"))),
		}
	}

	fn to_text(&self) -> String {
		match self.kind() {
			Kind::Scalar(scalar @ Scalar::Duration(_)) => scalar.to_string(),
			_ => format!("{self:?}"),
		}
	}

	fn scalar_type() -> bool {
		true
	}
}

impl<Tz: TimeZone + 'static> Capture for DateTime<Tz> {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::DateTimeOffset(self.with_timezone(&self.offset().fix())))
	}

	fn to_text(&self) -> String {
		self.with_timezone(&self.offset().fix()).to_string()
	}

	fn scalar_type() -> bool {
		true
	}
}

impl Capture for Url {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::Uri(self.clone()))
	}

	fn to_text(&self) -> String {
		self.to_string()
	}

	fn scalar_type() -> bool {
		true
	}
}

impl Capture for str {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::Str(self.to_owned()))
	}

	fn type_name(&self) -> &'static str {
		"str"
	}

	fn to_text(&self) -> String {
		self.to_owned()
	}
}

impl Capture for String {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::Str(self.clone()))
	}

	fn to_text(&self) -> String {
		self.clone()
	}

	fn scalar_type() -> bool {
		true
	}
}

impl Capture for Cow<'static, str> {
	fn kind(&self) -> Kind<'_> {
		Kind::Scalar(Scalar::Str(self.to_string()))
	}

	fn to_text(&self) -> String {
		self.to_string()
	}

	fn scalar_type() -> bool {
		true
	}
}

impl Capture for () {
	fn kind(&self) -> Kind<'_> {
		Kind::Null
	}

	fn to_text(&self) -> String {
		String::new()
	}
}

macro_rules! capture_pointer {
	($($pointer:ident),*) => {$(
		impl<T: Capture + ?Sized> Capture for $pointer<T> {
			fn kind(&self) -> Kind<'_> {
				(**self).kind()
			}

			fn type_name(&self) -> &'static str {
				(**self).type_name()
			}

			fn runtime_type(&self) -> TypeId {
				(**self).runtime_type()
			}

			fn to_text(&self) -> String {
				(**self).to_text()
			}

			fn scalar_type() -> bool {
				pointee_is_scalar::<T>()
			}
		}
	)*};
}

/// Pointers count as scalar keys only when they point at `str`.
fn pointee_is_scalar<T: Capture + ?Sized>() -> bool {
	TypeId::of::<T>() == TypeId::of::<str>()
}

capture_pointer!(Box, Arc, Rc);

impl<T: Capture + ?Sized> Capture for &'static T {
	fn kind(&self) -> Kind<'_> {
		(**self).kind()
	}

	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}

	fn runtime_type(&self) -> TypeId {
		(**self).runtime_type()
	}

	fn to_text(&self) -> String {
		(**self).to_text()
	}

	fn scalar_type() -> bool {
		pointee_is_scalar::<T>()
	}
}

impl<T: Capture> Capture for Option<T> {
	fn kind(&self) -> Kind<'_> {
		Kind::Optional(self.as_ref().map(|value| value as &dyn Capture))
	}

	fn type_name(&self) -> &'static str {
		match self {
			Some(value) => value.type_name(),
			None => "Option",
		}
	}

	fn to_text(&self) -> String {
		self.as_ref().map(Capture::to_text).unwrap_or_default()
	}
}

fn join_text<'a>(items: impl Iterator<Item = &'a dyn Capture>) -> String {
	let parts: Vec<String> = items.map(|item| item.to_text()).collect();
	format!("[{}]", parts.join(", "))
}

impl<T: Capture> Capture for [T] {
	fn kind(&self) -> Kind<'_> {
		if TypeId::of::<T>() == TypeId::of::<u8>() {
			let bytes = self.iter().filter_map(|item| (item as &dyn Any).downcast_ref::<u8>().copied()).collect();
			return Kind::Bytes(Cow::Owned(bytes));
		}
		Kind::Sequence(Box::new(self.iter().map(|item| item as &dyn Capture)))
	}

	fn to_text(&self) -> String {
		join_text(self.iter().map(|item| item as &dyn Capture))
	}
}

impl<T: Capture> Capture for Vec<T> {
	fn kind(&self) -> Kind<'_> {
		if let Some(bytes) = (self as &dyn Any).downcast_ref::<Vec<u8>>() {
			return Kind::Bytes(Cow::Borrowed(bytes));
		}
		self.as_slice().kind()
	}

	fn to_text(&self) -> String {
		self.as_slice().to_text()
	}
}

impl<T: Capture, const N: usize> Capture for [T; N] {
	fn kind(&self) -> Kind<'_> {
		if let Some(bytes) = (self as &dyn Any).downcast_ref::<[u8; N]>() {
			return Kind::Bytes(Cow::Borrowed(bytes));
		}
		self.as_slice().kind()
	}

	fn to_text(&self) -> String {
		self.as_slice().to_text()
	}
}

macro_rules! capture_sequence {
	($($collection:ident<T $(, $extra:ident)*>),*) => {$(
		impl<T: Capture $(, $extra: 'static)*> Capture for $collection<T $(, $extra)*> {
			fn kind(&self) -> Kind<'_> {
				Kind::Sequence(Box::new(self.iter().map(|item| item as &dyn Capture)))
			}

			fn to_text(&self) -> String {
				join_text(self.iter().map(|item| item as &dyn Capture))
			}
		}
	)*};
}

capture_sequence!(VecDeque<T>, BTreeSet<T>, HashSet<T, S>);

impl<K: Capture, V: Capture, S: 'static> Capture for HashMap<K, V, S> {
	fn kind(&self) -> Kind<'_> {
		Kind::Mapping(KeyType::of::<K>(), Box::new(self.iter().map(|(key, value)| (key as &dyn Capture, value as &dyn Capture))))
	}
}

impl<K: Capture, V: Capture> Capture for BTreeMap<K, V> {
	fn kind(&self) -> Kind<'_> {
		Kind::Mapping(KeyType::of::<K>(), Box::new(self.iter().map(|(key, value)| (key as &dyn Capture, value as &dyn Capture))))
	}
}

macro_rules! capture_tuple {
	($(($($name:ident $idx:tt),+)),*) => {$(
		impl<$($name: Capture),+> Capture for ($($name,)+) {
			fn kind(&self) -> Kind<'_> {
				let members = vec![$(Member::new(stringify!($idx), &self.$idx)),+];
				Kind::Object(Box::new(members.into_iter()))
			}

			fn to_text(&self) -> String {
				let parts = [$(self.$idx.to_text()),+];
				format!("({})", parts.join(", "))
			}
		}
	)*};
}

capture_tuple!((A 0, B 1), (A 0, B 1, C 2), (A 0, B 1, C 2, D 3));

macro_rules! capture_fn {
	($(($($arg:ident),*)),*) => {$(
		impl<R: 'static $(, $arg: 'static)*> Capture for fn($($arg),*) -> R {
			fn kind(&self) -> Kind<'_> {
				Kind::Callable
			}

			fn to_text(&self) -> String {
				std::any::type_name::<Self>().to_owned()
			}
		}
	)*};
}

capture_fn!((), (A), (A, B), (A, B, C));
