use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::{format_date, format_date_time, format_duration, format_time};
use crate::template::{Culture, FormatProvider};

fn moment() -> NaiveDateTime {
	NaiveDate::from_ymd_opt(2013, 5, 20)
		.and_then(|date| date.and_hms_nano_opt(16, 39, 7, 250_000_000))
		.expect("valid date")
}

fn render(format: Option<&str>, culture: &Culture) -> String {
	let mut out = String::new();
	format_date_time(&moment(), None, format, culture.date_time_format(), &mut out);
	out
}

fn render_offset(format: Option<&str>, hours: i32) -> String {
	let offset = FixedOffset::east_opt(hours * 3600).expect("valid offset");
	let mut out = String::new();
	format_date_time(&moment(), Some(&offset), format, Culture::invariant().date_time_format(), &mut out);
	out
}

#[test]
fn default_form_is_general_long_time() {
	assert_eq!(render(None, &Culture::invariant()), "05/20/2013 16:39:07");
	assert_eq!(render(None, &Culture::fr_fr()), "20/05/2013 16:39:07");
	assert_eq!(render(None, &Culture::de_de()), "20.05.2013 16:39:07");
	assert_eq!(render(None, &Culture::en_us()), "5/20/2013 4:39:07 PM");
}

#[test]
fn standard_formats_follow_culture_patterns() {
	let invariant = Culture::invariant();
	assert_eq!(render(Some("d"), &invariant), "05/20/2013");
	assert_eq!(render(Some("D"), &invariant), "Monday, 20 May 2013");
	assert_eq!(render(Some("t"), &invariant), "16:39");
	assert_eq!(render(Some("D"), &Culture::fr_fr()), "lundi 20 mai 2013");
	assert_eq!(render(Some("M"), &Culture::en_gb()), "20 May");
	assert_eq!(render(Some("Y"), &Culture::de_de()), "Mai 2013");
}

#[test]
fn culture_independent_standard_formats() {
	let fr = Culture::fr_fr();
	assert_eq!(render(Some("s"), &fr), "2013-05-20T16:39:07");
	assert_eq!(render(Some("o"), &fr), "2013-05-20T16:39:07.2500000");
	assert_eq!(render(Some("R"), &fr), "Mon, 20 May 2013 16:39:07 GMT");
}

#[test]
fn offsets_render_and_convert_to_utc() {
	assert_eq!(render_offset(None, 2), "05/20/2013 16:39:07 +02:00");
	assert_eq!(render_offset(Some("o"), -5), "2013-05-20T16:39:07.2500000-05:00");
	assert_eq!(render_offset(Some("u"), 2), "2013-05-20 14:39:07Z");
	assert_eq!(render_offset(Some("zz"), 2), "+02");
}

#[test]
fn custom_patterns_cover_fields_and_literals() {
	let invariant = Culture::invariant();
	assert_eq!(render(Some("yyyy-MM-dd"), &invariant), "2013-05-20");
	assert_eq!(render(Some("d/M/yy"), &invariant), "20/5/13");
	assert_eq!(render(Some("hh:mm tt"), &invariant), "04:39 PM");
	assert_eq!(render(Some("HH:mm:ss.fff"), &invariant), "16:39:07.250");
	assert_eq!(render(Some("ss.FFFF"), &invariant), "07.25");
	assert_eq!(render(Some("dddd 'at' H\\h"), &invariant), "Monday at 16h");
	assert_eq!(render(Some("ddd MMM"), &Culture::fr_fr()), "lun. mai");
}

#[test]
fn zero_fraction_drops_trailing_point() {
	let value = NaiveDate::from_ymd_opt(2020, 1, 2).and_then(|date| date.and_hms_opt(3, 4, 5)).expect("valid date");
	let mut out = String::new();
	format_date_time(&value, None, Some("HH:mm:ss.FFF"), Culture::invariant().date_time_format(), &mut out);
	assert_eq!(out, "03:04:05");
}

#[test]
fn strftime_patterns_are_supported() {
	let invariant = Culture::invariant();
	assert_eq!(render(Some("%Y/%m/%d %H:%M"), &invariant), "2013/05/20 16:39");
	assert_eq!(render_offset(Some("%H:%M %:z"), 2), "16:39 +02:00");
}

#[test]
fn invalid_formats_fall_back_to_default() {
	let invariant = Culture::invariant();
	assert_eq!(render(Some("%Q"), &invariant), "05/20/2013 16:39:07");
	assert_eq!(render(Some("x"), &invariant), "05/20/2013 16:39:07");
}

#[test]
fn dates_and_times_use_their_own_defaults() {
	let date = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
	let time = NaiveTime::from_hms_opt(9, 5, 0).expect("valid time");
	let dates = Culture::invariant();

	let mut out = String::new();
	format_date(&date, None, dates.date_time_format(), &mut out);
	assert_eq!(out, "02/29/2024");

	out.clear();
	format_time(&time, None, dates.date_time_format(), &mut out);
	assert_eq!(out, "09:05");

	out.clear();
	format_time(&time, Some("h:mm tt"), Culture::en_us().date_time_format(), &mut out);
	assert_eq!(out, "9:05 AM");
}

#[test]
fn durations_render_constant_and_culture_forms() {
	let symbols = Culture::fr_fr();
	let duration = TimeDelta::days(1) + TimeDelta::hours(3) + TimeDelta::minutes(16) + TimeDelta::milliseconds(50_500);
	let render = |value: &TimeDelta, format: Option<&str>| {
		let mut out = String::new();
		format_duration(value, format, symbols.number_format(), &mut out);
		out
	};

	assert_eq!(render(&duration, None), "1.03:16:50.5000000");
	assert_eq!(render(&duration, Some("g")), "1:3:16:50,5");
	assert_eq!(render(&duration, Some("G")), "1:03:16:50,5000000");
	assert_eq!(render(&TimeDelta::seconds(-90), None), "-00:01:30");
	assert_eq!(render(&TimeDelta::zero(), Some("c")), "00:00:00");
}
