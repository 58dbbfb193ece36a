use msgtemplate::template::{MessageTemplate, Result};

use crate::cmd::util::{as_captures, converter, parse_values};

/// Print the properties captured for a template as JSON.
pub fn run(template: String, values: Vec<String>, max_depth: u32) -> Result<()> {
	let converter = converter(max_depth)?;

	let template = MessageTemplate::parse(&template);
	let values = parse_values(&values);
	let properties = converter.capture(&template, &as_captures(&values));

	println!("{}", serde_json::to_string_pretty(&properties)?);
	Ok(())
}
