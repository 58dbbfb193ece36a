use msgtemplate::template::{Culture, FormatProvider, MessageTemplate, Result};

use crate::cmd::util::{as_captures, converter, parse_values};

/// Render a template against command-line values.
pub fn run(template: String, values: Vec<String>, culture: Option<String>, max_depth: u32) -> Result<()> {
	let culture = culture.as_deref().map(Culture::from_name).transpose()?;
	let converter = converter(max_depth)?;

	let template = MessageTemplate::parse(&template);
	let values = parse_values(&values);
	let properties = converter.capture(&template, &as_captures(&values));

	let provider = culture.as_ref().map(|culture| culture as &dyn FormatProvider);
	println!("{}", template.render(&properties, provider));
	Ok(())
}
