use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::template::culture::INVARIANT;
use crate::template::{DateTimeFormat, FormatProvider, NumberFormat};

const ROUND_TRIP: &str = "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffK";
const RFC1123: &str = "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'";
const SORTABLE: &str = "yyyy'-'MM'-'dd'T'HH':'mm':'ss";
const UNIVERSAL_SORTABLE: &str = "yyyy'-'MM'-'dd HH':'mm':'ss'Z'";

/// Expanded standard date/time format.
struct Standard {
	pattern: String,
	invariant: bool,
	utc: bool,
}

fn expand_standard(letter: char, dates: &DateTimeFormat) -> Option<Standard> {
	let culture = |pattern: String| Standard {
		pattern,
		invariant: false,
		utc: false,
	};
	let fixed = |pattern: &str, utc: bool| Standard {
		pattern: pattern.to_owned(),
		invariant: true,
		utc,
	};
	let standard = match letter {
		'd' => culture(dates.short_date.to_owned()),
		'D' => culture(dates.long_date.to_owned()),
		'f' => culture(format!("{} {}", dates.long_date, dates.short_time)),
		'F' => culture(format!("{} {}", dates.long_date, dates.long_time)),
		'g' => culture(format!("{} {}", dates.short_date, dates.short_time)),
		'G' => culture(format!("{} {}", dates.short_date, dates.long_time)),
		'm' | 'M' => culture(dates.month_day.to_owned()),
		'y' | 'Y' => culture(dates.year_month.to_owned()),
		't' => culture(dates.short_time.to_owned()),
		'T' => culture(dates.long_time.to_owned()),
		'o' | 'O' => fixed(ROUND_TRIP, false),
		'r' | 'R' => fixed(RFC1123, true),
		's' => fixed(SORTABLE, false),
		'u' => fixed(UNIVERSAL_SORTABLE, true),
		_ => return None,
	};
	Some(standard)
}

/// Render a date and time, optionally carrying a fixed offset.
///
/// Single-letter formats are standard formats, formats containing `%` are
/// strftime patterns, and anything else is a custom pattern. Unknown
/// standard letters and invalid strftime patterns render the default form.
pub(crate) fn format_date_time(value: &NaiveDateTime, offset: Option<&FixedOffset>, format: Option<&str>, dates: &DateTimeFormat, out: &mut String) {
	write_moment(value, offset, format, 'G', dates, out);
}

/// Render a calendar date; the default form is the short date.
pub(crate) fn format_date(value: &NaiveDate, format: Option<&str>, dates: &DateTimeFormat, out: &mut String) {
	write_moment(&value.and_time(NaiveTime::MIN), None, format, 'd', dates, out);
}

/// Render a time of day; the default form is the short time.
pub(crate) fn format_time(value: &NaiveTime, format: Option<&str>, dates: &DateTimeFormat, out: &mut String) {
	let epoch = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
	write_moment(&epoch.and_time(*value), None, format, 't', dates, out);
}

fn write_moment(value: &NaiveDateTime, offset: Option<&FixedOffset>, format: Option<&str>, default: char, dates: &DateTimeFormat, out: &mut String) {
	let Some(format) = format.filter(|format| !format.is_empty()) else {
		write_default(value, offset, default, dates, out);
		return;
	};

	if format.contains('%') {
		if !write_strftime(value, offset, format, out) {
			write_default(value, offset, default, dates, out);
		}
		return;
	}

	let mut chars = format.chars();
	if let (Some(letter), None) = (chars.next(), chars.next()) {
		match expand_standard(letter, dates) {
			Some(standard) => write_standard(value, offset, &standard, dates, out),
			None => write_default(value, offset, default, dates, out),
		}
		return;
	}

	write_custom(format, value, offset, dates, out);
}

fn write_default(value: &NaiveDateTime, offset: Option<&FixedOffset>, letter: char, dates: &DateTimeFormat, out: &mut String) {
	if let Some(standard) = expand_standard(letter, dates) {
		write_standard(value, offset, &standard, dates, out);
	}
	if offset.is_some() {
		out.push(' ');
		write_custom("zzz", value, offset, dates, out);
	}
}

fn write_standard(value: &NaiveDateTime, offset: Option<&FixedOffset>, standard: &Standard, dates: &DateTimeFormat, out: &mut String) {
	let dates = if standard.invariant { INVARIANT.date_time_format() } else { dates };
	match offset {
		Some(offset) if standard.utc => {
			let utc = value.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc()))).unwrap_or(*value);
			write_custom(&standard.pattern, &utc, None, dates, out);
		}
		_ => write_custom(&standard.pattern, value, offset, dates, out),
	}
}

fn write_strftime(value: &NaiveDateTime, offset: Option<&FixedOffset>, format: &str, out: &mut String) -> bool {
	let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
	if items.iter().any(|item| matches!(item, Item::Error)) {
		return false;
	}

	let mut scratch = String::new();
	let written = match offset.and_then(|offset| value.and_local_timezone(*offset).single()) {
		Some(aware) => write!(scratch, "{}", aware.format_with_items(items.iter())),
		None => write!(scratch, "{}", value.format_with_items(items.iter())),
	};
	if written.is_err() {
		return false;
	}
	out.push_str(&scratch);
	true
}

fn push_padded(value: impl Into<i64>, width: usize, out: &mut String) {
	let value = value.into();
	if value < 0 {
		out.push('-');
	}
	out.push_str(&format!("{:0width$}", value.unsigned_abs(), width = width));
}

fn push_offset(seconds: i32, run: usize, out: &mut String) {
	out.push(if seconds < 0 { '-' } else { '+' });
	let seconds = seconds.unsigned_abs();
	let (hours, minutes) = (seconds / 3600, seconds % 3600 / 60);
	match run {
		1 => {
			out.push_str(&format!("{hours}"));
		}
		2 => {
			out.push_str(&format!("{hours:02}"));
		}
		_ => {
			out.push_str(&format!("{hours:02}:{minutes:02}"));
		}
	}
}

/// Custom date/time pattern in `dd/MM/yyyy HH:mm:ss` syntax.
fn write_custom(pattern: &str, value: &NaiveDateTime, offset: Option<&FixedOffset>, dates: &DateTimeFormat, out: &mut String) {
	let chars: Vec<char> = pattern.chars().collect();
	let mut idx = 0;
	while idx < chars.len() {
		let ch = chars[idx];
		let run = chars[idx..].iter().take_while(|next| **next == ch).count();
		let weekday = value.weekday().num_days_from_sunday() as usize;
		let month = value.month0() as usize;
		match ch {
			'd' => match run {
				1 | 2 => push_padded(value.day(), run, out),
				3 => out.push_str(dates.abbreviated_day_names[weekday]),
				_ => out.push_str(dates.day_names[weekday]),
			},
			'M' => match run {
				1 | 2 => push_padded(value.month(), run, out),
				3 => out.push_str(dates.abbreviated_month_names[month]),
				_ => out.push_str(dates.month_names[month]),
			},
			'y' => match run {
				1 | 2 => push_padded(value.year().rem_euclid(100), run, out),
				_ => push_padded(value.year(), run, out),
			},
			'h' => {
				let hour = match value.hour() % 12 {
					0 => 12,
					hour => hour,
				};
				push_padded(hour, run.min(2), out);
			}
			'H' => push_padded(value.hour(), run.min(2), out),
			'm' => push_padded(value.minute(), run.min(2), out),
			's' => push_padded(value.second(), run.min(2), out),
			'f' | 'F' => {
				let nanos = format!("{:09}", value.nanosecond() % 1_000_000_000);
				let digits = &nanos[..run.min(7)];
				if ch == 'f' {
					out.push_str(digits);
				} else {
					let trimmed = digits.trim_end_matches('0');
					if trimmed.is_empty() {
						if out.ends_with('.') {
							out.pop();
						}
					} else {
						out.push_str(trimmed);
					}
				}
			}
			't' => {
				let designator = if value.hour() < 12 { dates.am_designator } else { dates.pm_designator };
				if run == 1 {
					out.extend(designator.chars().next());
				} else {
					out.push_str(designator);
				}
			}
			'z' => push_offset(offset.map_or(0, FixedOffset::local_minus_utc), run, out),
			'K' => {
				if let Some(offset) = offset {
					push_offset(offset.local_minus_utc(), 3, out);
				}
			}
			'g' => out.push_str(if value.year() > 0 { "A.D." } else { "B.C." }),
			':' => out.push_str(dates.time_separator),
			'/' => out.push_str(dates.date_separator),
			'\'' | '"' => {
				let close = chars[idx + 1..].iter().position(|next| *next == ch).map_or(chars.len(), |at| idx + 1 + at);
				out.extend(&chars[idx + 1..close]);
				idx = close + 1;
				continue;
			}
			'\\' => {
				out.extend(chars.get(idx + 1));
				idx += 2;
				continue;
			}
			_ => {
				out.push(ch);
				idx += 1;
				continue;
			}
		}
		idx += match ch {
			':' | '/' => 1,
			_ => run,
		};
	}
}

/// Render a duration.
///
/// `c` (and the default) is `[-][d.]hh:mm:ss[.fffffff]`; `g` is the short
/// culture form `[-][d:]h:mm:ss[.FFFFFFF]`; `G` is the long culture form
/// `[-]d:hh:mm:ss.fffffff`. Other formats render the `c` form.
pub(crate) fn format_duration(value: &TimeDelta, format: Option<&str>, symbols: &NumberFormat, out: &mut String) {
	let seconds = value.num_seconds();
	let nanos = value.subsec_nanos();
	if seconds < 0 || nanos < 0 {
		out.push('-');
	}
	let seconds = seconds.unsigned_abs();
	let ticks = nanos.unsigned_abs() / 100;
	let (days, hours, minutes, secs) = (seconds / 86_400, seconds % 86_400 / 3600, seconds % 3600 / 60, seconds % 60);

	match format {
		Some("g") => {
			if days > 0 {
				out.push_str(&format!("{days}:"));
			}
			out.push_str(&format!("{hours}:{minutes:02}:{secs:02}"));
			let fraction = format!("{ticks:07}");
			let fraction = fraction.trim_end_matches('0');
			if !fraction.is_empty() {
				out.push_str(symbols.decimal_separator);
				out.push_str(fraction);
			}
		}
		Some("G") => {
			out.push_str(&format!("{days}:{hours:02}:{minutes:02}:{secs:02}"));
			out.push_str(symbols.decimal_separator);
			out.push_str(&format!("{ticks:07}"));
		}
		_ => {
			if days > 0 {
				out.push_str(&format!("{days}."));
			}
			out.push_str(&format!("{hours:02}:{minutes:02}:{secs:02}"));
			if ticks > 0 {
				out.push_str(&format!(".{ticks:07}"));
			}
		}
	}
}

#[cfg(test)]
mod tests;
