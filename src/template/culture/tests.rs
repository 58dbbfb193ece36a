use super::*;

#[test]
fn from_name_normalizes_case_and_separator() {
	assert_eq!(Culture::from_name("FR_fr").expect("fr").name(), "fr-FR");
	assert_eq!(Culture::from_name("en-GB").expect("en-GB").name(), "en-GB");
	assert_eq!(Culture::from_name("de").expect("de").name(), "de-DE");
	assert_eq!(Culture::from_name("en").expect("en").name(), "en-US");
}

#[test]
fn empty_and_invariant_names_select_invariant() {
	assert_eq!(Culture::from_name("").expect("empty"), Culture::invariant());
	assert_eq!(Culture::from_name(" Invariant ").expect("invariant"), Culture::invariant());
	assert_eq!(Culture::default(), Culture::invariant());
}

#[test]
fn unknown_culture_is_an_error() {
	let err = Culture::from_name("xx-YY").expect_err("unknown culture");
	assert!(matches!(err, TemplateError::UnknownCulture { ref name } if name == "xx-YY"));
}

#[test]
fn cultures_carry_distinct_symbols() {
	let fr = Culture::fr_fr();
	assert_eq!(fr.number_format().decimal_separator, ",");
	assert_eq!(fr.date_time_format().short_date, "dd/MM/yyyy");
	assert_eq!(fr.date_time_format().month_names[4], "mai");

	let us = Culture::en_us();
	assert_eq!(us.number_format().decimal_separator, ".");
	assert_eq!(us.date_time_format().long_time, "h:mm:ss tt");
	assert!(us.custom_formatter().is_none());
}

#[test]
fn missing_provider_falls_back_to_invariant() {
	let provider = provider_or_invariant(None);
	assert_eq!(provider.number_format(), Culture::invariant().number_format());

	let fr = Culture::fr_fr();
	let provider = provider_or_invariant(Some(&fr));
	assert_eq!(provider.number_format().decimal_separator, ",");
}
