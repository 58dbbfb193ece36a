use tracing::debug;

use crate::template::{BindingMode, Capture, Converter, MessageTemplate, Property, PropertyList, PropertyToken, PropertyValueFactory};

/// Pairs template placeholders with supplied values.
pub struct PropertyBinder<'c> {
	converter: &'c Converter,
}

impl<'c> PropertyBinder<'c> {
	/// Binder converting values with `converter`.
	pub fn new(converter: &'c Converter) -> Self {
		Self { converter }
	}

	/// Bind `values` to the template's placeholders.
	///
	/// Mismatched counts never fail: surplus values are dropped and
	/// placeholders without a value stay unbound.
	pub fn construct_properties(&self, template: &MessageTemplate, values: &[&dyn Capture]) -> PropertyList {
		match template.binding_mode() {
			BindingMode::None => {
				if !values.is_empty() {
					debug!(template = template.text(), supplied = values.len(), "values supplied to a template without properties");
				}
				PropertyList::new()
			}
			BindingMode::Positional => self.construct_positional(template, values),
			BindingMode::Named => self.construct_named(template, values),
		}
	}

	fn construct_positional(&self, template: &MessageTemplate, values: &[&dyn Capture]) -> PropertyList {
		let tokens: Vec<&PropertyToken> = template.property_tokens().collect();
		if tokens.len() != values.len() {
			debug!(
				template = template.text(),
				properties = tokens.len(),
				supplied = values.len(),
				"positional property count does not match value count"
			);
		}

		let mut slots: Vec<Option<Property>> = values.iter().map(|_| None).collect();
		for token in tokens {
			let Some(position) = token.position() else {
				continue;
			};
			match values.get(position) {
				Some(value) => slots[position] = Some(self.construct_property(token, *value)),
				None => debug!(template = template.text(), position, "unassigned positional value"),
			}
		}
		slots.into_iter().flatten().collect()
	}

	fn construct_named(&self, template: &MessageTemplate, values: &[&dyn Capture]) -> PropertyList {
		let tokens: Vec<&PropertyToken> = template.property_tokens().collect();
		if tokens.len() != values.len() {
			debug!(
				template = template.text(),
				properties = tokens.len(),
				supplied = values.len(),
				"named property count does not match value count"
			);
		}

		tokens.into_iter().zip(values).map(|(token, value)| self.construct_property(token, *value)).collect()
	}

	fn construct_property(&self, token: &PropertyToken, value: &dyn Capture) -> Property {
		Property::new(token.name(), self.converter.create_property_value(value, token.destructuring()))
	}
}
