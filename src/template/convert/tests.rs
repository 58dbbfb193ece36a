use std::collections::{BTreeMap, HashMap};

use super::*;
use crate::template::{AccessError, Member};

struct Ouroboros;

impl Capture for Ouroboros {
	fn kind(&self) -> Kind<'_> {
		Kind::Object(Box::new(std::iter::once(Member::new("me", self))))
	}
}

struct Flaky;

impl Capture for Flaky {
	fn kind(&self) -> Kind<'_> {
		let members = vec![Member::owned("ok", 1_i32), Member::failed("bad", AccessError::new("boom"))];
		Kind::Object(Box::new(members.into_iter()))
	}
}

struct Point {
	x: i32,
	y: i32,
}

impl Capture for Point {
	fn kind(&self) -> Kind<'_> {
		Kind::Object(Box::new(vec![Member::new("x", &self.x), Member::new("y", &self.y)].into_iter()))
	}

	fn to_text(&self) -> String {
		format!("({}, {})", self.x, self.y)
	}
}

struct Leaf {
	plain: i32,
	wrapped: Option<i32>,
}

crate::capture_struct!(Leaf { plain, wrapped });

struct Handle(u32);

impl Capture for Handle {
	fn kind(&self) -> Kind<'_> {
		Kind::Opaque
	}

	fn to_text(&self) -> String {
		format!("handle#{}", self.0)
	}
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Mood {
	Calm,
}

crate::capture_enum!(Mood { Calm });

fn convert(value: &dyn Capture, destructuring: Destructuring) -> Value {
	Converter::default().create_property_value(value, destructuring)
}

fn nesting(value: &Value) -> usize {
	match value {
		Value::Scalar(_) => 0,
		Value::Sequence(items) => 1 + items.iter().map(nesting).max().unwrap_or(0),
		Value::Dictionary(dictionary) => 1 + dictionary.entries().iter().map(|(_, value)| nesting(value)).max().unwrap_or(0),
		Value::Structure(structure) => 1 + structure.properties().iter().map(|property| nesting(&property.value)).max().unwrap_or(0),
	}
}

#[test]
fn builder_rejects_zero_depth() {
	let err = Converter::builder().max_depth(0).build().err().expect("zero depth is rejected");
	assert!(matches!(err, TemplateError::InvalidMaxDepth { max_depth: 0 }));
	assert!(Converter::new(CaptureOptions::for_diagnostics()).is_ok());
	assert_eq!(Converter::default().options().max_depth, 10);
}

#[test]
fn nulls_and_scalars_pass_through() {
	assert_eq!(convert(&(), Destructuring::Destructure), Value::null());
	assert_eq!(convert(&None::<i32>, Destructuring::Default), Value::null());
	assert_eq!(convert(&5_i32, Destructuring::Destructure), Value::Scalar(Scalar::I32(5)));
	assert_eq!(convert(&Some(5_i32), Destructuring::Default), Value::Scalar(Scalar::I32(5)));
	assert_eq!(
		convert(&Mood::Calm, Destructuring::Default),
		Value::Scalar(Scalar::Enum {
			type_name: "Mood".into(),
			variant: "Calm".into(),
		})
	);
}

#[test]
fn stringify_uses_text_form() {
	let point = Point { x: 1, y: 2 };
	assert_eq!(convert(&point, Destructuring::Stringify), Value::string("(1, 2)"));
	assert_eq!(convert(&vec![1_i32, 2], Destructuring::Stringify), Value::string("[1, 2]"));
}

#[test]
fn default_mode_stringifies_objects_and_keeps_sequences() {
	let point = Point { x: 1, y: 2 };
	assert_eq!(convert(&point, Destructuring::Default), Value::string("(1, 2)"));
	assert_eq!(
		convert(&vec![1_i32, 2], Destructuring::Default),
		Value::Sequence(vec![Value::Scalar(Scalar::I32(1)), Value::Scalar(Scalar::I32(2))])
	);
}

#[test]
fn destructure_builds_tagged_structures() {
	let point = Point { x: 1, y: 2 };
	let value = convert(&point, Destructuring::Destructure);
	assert_eq!(value.to_string(), "Point { x: 1, y: 2 }");

	let optional = Some(Point { x: 3, y: 4 });
	assert_eq!(convert(&optional, Destructuring::Destructure).to_string(), "Point { x: 3, y: 4 }");

	let tuple = (1_i32, "a");
	assert_eq!(convert(&tuple, Destructuring::Destructure).to_string(), "{ 0: 1, 1: \"a\" }");
}

#[test]
fn accessor_failures_become_messages() {
	let value = convert(&Flaky, Destructuring::Destructure);
	assert_eq!(value.to_string(), "Flaky { ok: 1, bad: \"The property accessor failed: boom\" }");
}

#[test]
fn self_reference_is_cut_at_max_depth() {
	let value = convert(&Ouroboros, Destructuring::Destructure);
	assert_eq!(nesting(&value), 10);

	let shallow = Converter::builder().max_depth(2).build().expect("valid depth");
	let value = shallow.create_property_value(&Ouroboros, Destructuring::Destructure);
	assert_eq!(value.to_string(), "Ouroboros { me: Ouroboros { me: null } }");
}

#[test]
fn options_add_no_depth() {
	let converter = Converter::builder().max_depth(1).build().expect("valid depth");
	assert_eq!(converter.create_property_value(&Some(5_i32), Destructuring::Default), Value::Scalar(Scalar::I32(5)));
	assert_eq!(converter.create_property_value(&Some(Some(5_i32)), Destructuring::Destructure).to_string(), "5");

	let converter = Converter::builder().max_depth(2).build().expect("valid depth");
	let leaf = Leaf {
		plain: 5,
		wrapped: Some(5),
	};
	let value = converter.create_property_value(&vec![leaf], Destructuring::Destructure);
	assert_eq!(value.to_string(), "[Leaf { plain: null, wrapped: null }]");
	let value = converter.create_property_value(
		&Leaf {
			plain: 5,
			wrapped: Some(5),
		},
		Destructuring::Destructure,
	);
	assert_eq!(value.to_string(), "Leaf { plain: 5, wrapped: 5 }");
}

#[test]
fn opaque_values_use_text_or_an_empty_structure() {
	assert_eq!(convert(&Handle(7), Destructuring::Default), Value::string("handle#7"));
	assert_eq!(convert(&Handle(7), Destructuring::Destructure).to_string(), "Handle { }");
	assert_eq!(convert(&Handle(7), Destructuring::Stringify), Value::string("handle#7"));
}

#[test]
fn nested_sequences_are_cut_at_max_depth() {
	let converter = Converter::builder().max_depth(2).build().expect("valid depth");
	let nested = vec![vec![vec![1_i32]]];
	let value = converter.create_property_value(&nested, Destructuring::Default);
	assert_eq!(value.to_string(), "[[null]]");
}

#[test]
fn scalar_keyed_mappings_become_dictionaries() {
	let map: BTreeMap<&'static str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
	let value = convert(&map, Destructuring::Default);
	assert!(matches!(value, Value::Dictionary(_)));
	assert_eq!(value.to_string(), "[(\"a\": 1), (\"b\": 2)]");

	let empty: BTreeMap<i32, i32> = BTreeMap::new();
	assert_eq!(convert(&empty, Destructuring::Default), Value::Dictionary(DictionaryValue::new()));
}

#[test]
fn non_scalar_keys_never_produce_dictionaries() {
	let map: BTreeMap<(i32, i32), &'static str> = [((1, 2), "x")].into_iter().collect();

	let value = convert(&map, Destructuring::Default);
	assert_eq!(value, Value::Sequence(vec![Value::string("[(1, 2), x]")]));

	let value = convert(&map, Destructuring::Destructure);
	assert_eq!(value.to_string(), "[{ key: { 0: 1, 1: 2 }, value: \"x\" }]");

	let empty: HashMap<Vec<i32>, i32> = HashMap::new();
	let value = convert(&empty, Destructuring::Default);
	assert_eq!(value, Value::Sequence(Vec::new()));
	assert_eq!(serde_json::to_string(&value).expect("serializable"), "[]");
}

#[test]
fn declared_scalar_keys_form_dictionaries() {
	let converter = Converter::builder().scalar_type::<Point>().build().expect("valid converter");
	let empty: BTreeMap<Point, i32> = BTreeMap::new();
	assert_eq!(converter.create_property_value(&empty, Destructuring::Default), Value::Dictionary(DictionaryValue::new()));

	let keyed: BTreeMap<Mood, i32> = [(Mood::Calm, 1)].into_iter().collect();
	assert_eq!(convert(&keyed, Destructuring::Default).to_string(), "[(Calm: 1)]");
}

#[test]
fn large_byte_buffers_are_summarized() {
	let small = vec![0xab_u8; 3];
	assert_eq!(convert(&small, Destructuring::Default), Value::Scalar(Scalar::Bytes(vec![0xab; 3])));

	let large = vec![0xab_u8; MAX_CAPTURED_BYTES + 1];
	let expected = format!("{}... (1025 bytes)", "AB".repeat(16));
	assert_eq!(convert(&large, Destructuring::Default), Value::string(expected));
}

#[test]
fn callables_are_never_destructured() {
	fn handler(value: i32) -> i32 {
		value
	}
	let callable: fn(i32) -> i32 = handler;
	let value = convert(&callable, Destructuring::Destructure);
	assert!(matches!(value, Value::Scalar(Scalar::Str(ref text)) if text.contains("fn(i32) -> i32")));
}

#[test]
fn declared_scalar_types_capture_as_text() {
	let converter = Converter::builder().scalar_type::<Point>().build().expect("valid converter");
	let value = converter.create_property_value(&Point { x: 5, y: 6 }, Destructuring::Destructure);
	assert_eq!(
		value,
		Value::Scalar(Scalar::Other {
			type_name: "Point".into(),
			text: "(5, 6)".into(),
		})
	);
	assert_eq!(value.to_string(), "(5, 6)");
}

#[test]
fn destructuring_policies_run_before_built_ins() {
	let converter = Converter::builder()
		.destructuring_policy(|value: &dyn Capture, _factory: &dyn PropertyValueFactory| {
			(value.type_name() == "Point").then(|| Value::string("custom point"))
		})
		.build()
		.expect("valid converter");

	let point = Point { x: 1, y: 2 };
	assert_eq!(converter.create_property_value(&point, Destructuring::Destructure), Value::string("custom point"));
	assert_eq!(converter.create_property_value(&point, Destructuring::Default), Value::string("(1, 2)"));
}

#[test]
fn policies_convert_children_through_the_factory() {
	let converter = Converter::builder()
		.destructuring_policy(|value: &dyn Capture, factory: &dyn PropertyValueFactory| {
			if value.type_name() != "Point" {
				return None;
			}
			Some(Value::Sequence(vec![factory.create_property_value(&Ouroboros, Destructuring::Destructure)]))
		})
		.max_depth(3)
		.build()
		.expect("valid converter");

	let value = converter.create_property_value(&Point { x: 0, y: 0 }, Destructuring::Destructure);
	assert_eq!(nesting(&value), 3);
}

#[test]
fn breadth_caps_limit_items_and_strings() {
	let converter = Converter::builder().max_collection_items(Some(2)).max_string_len(Some(4)).build().expect("valid converter");

	let value = converter.create_property_value(&vec![1_i32, 2, 3], Destructuring::Default);
	assert_eq!(value.to_string(), "[1, 2]");

	let value = converter.create_property_value(&"abcdefgh", Destructuring::Default);
	assert_eq!(value, Value::string("abc…"));

	let value = converter.create_property_value(&"abcd", Destructuring::Stringify);
	assert_eq!(value, Value::string("abcd"));
}
