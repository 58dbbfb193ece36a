use msgtemplate::template::{AlignmentDirection, Destructuring, MessageTemplate, PropertyToken, Result, Token};
use serde_json::{Value as JsonValue, json};

/// Parse a template and print its tokens.
pub fn run(template: String, json: bool) -> Result<()> {
	let template = MessageTemplate::parse(&template);

	if json {
		let tokens: Vec<JsonValue> = template.tokens().iter().map(token_json).collect();
		let out = json!({
			"text": template.text(),
			"binding": format!("{:?}", template.binding_mode()).to_ascii_lowercase(),
			"tokens": tokens,
		});
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	println!("binding: {:?}", template.binding_mode());
	println!("tokens: {}", template.tokens().len());
	println!("start\tkind\tname\tformat\talign\tmode\ttext");
	for token in template.tokens() {
		match token {
			Token::Text(text) => println!("{}\ttext\t-\t-\t-\t-\t{:?}", text.start_index, text.text),
			Token::Property(property) => println!(
				"{}\tproperty\t{}\t{}\t{}\t{}\t{:?}",
				property.start_index(),
				property.name(),
				property.format().unwrap_or("-"),
				render_alignment(property).unwrap_or_else(|| "-".to_owned()),
				mode_label(property.destructuring()),
				property.raw_text()
			),
		}
	}

	Ok(())
}

fn token_json(token: &Token) -> JsonValue {
	match token {
		Token::Text(text) => json!({
			"kind": "text",
			"start": text.start_index,
			"text": &*text.text,
		}),
		Token::Property(property) => json!({
			"kind": "property",
			"start": property.start_index(),
			"name": property.name(),
			"raw": property.raw_text(),
			"format": property.format(),
			"alignment": render_alignment(property),
			"destructuring": mode_label(property.destructuring()),
			"position": property.position(),
		}),
	}
}

fn render_alignment(property: &PropertyToken) -> Option<String> {
	property.alignment().map(|alignment| match alignment.direction {
		AlignmentDirection::Left => format!("-{}", alignment.width),
		AlignmentDirection::Right => alignment.width.to_string(),
	})
}

fn mode_label(mode: Destructuring) -> &'static str {
	match mode {
		Destructuring::Default => "default",
		Destructuring::Destructure => "destructure",
		Destructuring::Stringify => "stringify",
	}
}
