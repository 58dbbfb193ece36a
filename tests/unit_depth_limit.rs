#![allow(missing_docs)]

use msgtemplate::template::{Capture, Converter, Destructuring, Kind, Member, PropertyValueFactory, Value, parse};

struct Ouroboros;

impl Capture for Ouroboros {
	fn kind(&self) -> Kind<'_> {
		Kind::Object(Box::new(std::iter::once(Member::new("me", self))))
	}
}

struct Tower(u32);

impl Capture for Tower {
	fn kind(&self) -> Kind<'_> {
		let members = vec![Member::owned("level", self.0), Member::owned("next", Tower(self.0 + 1))];
		Kind::Object(Box::new(members.into_iter()))
	}
}

fn depth(value: &Value) -> usize {
	match value {
		Value::Structure(structure) => 1 + structure.properties().iter().map(|property| depth(&property.value)).max().unwrap_or(0),
		Value::Sequence(elements) => 1 + elements.iter().map(depth).max().unwrap_or(0),
		_ => 0,
	}
}

#[test]
fn self_reference_terminates() {
	let template = parse("{@Snake}");
	let properties = Converter::default().capture(&template, &[&Ouroboros]);
	let value = properties.get("Snake").expect("bound property");
	assert_eq!(depth(value), 10);
}

#[test]
fn unbounded_owned_children_terminate() {
	let converter = Converter::builder().max_depth(3).build().expect("valid depth");
	let value = converter.create_property_value(&Tower(0), Destructuring::Destructure);
	assert_eq!(
		value.to_string(),
		"Tower { level: 0, next: Tower { level: 1, next: Tower { level: null, next: null } } }"
	);
}

#[test]
fn depth_one_keeps_only_the_top_level() {
	let converter = Converter::builder().max_depth(1).build().expect("valid depth");
	let value = converter.create_property_value(&Tower(0), Destructuring::Destructure);
	assert_eq!(value.to_string(), "Tower { level: null, next: null }");
	assert_eq!(converter.create_property_value(&42_i32, Destructuring::Destructure).to_string(), "42");
}

#[test]
fn zero_depth_is_rejected() {
	assert!(Converter::builder().max_depth(0).build().is_err());
}
