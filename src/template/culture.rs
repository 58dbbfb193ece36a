use crate::template::{Result, Scalar, TemplateError};

/// Culture-specific numeric symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
	/// Decimal separator.
	pub decimal_separator: &'static str,
	/// Thousands group separator.
	pub group_separator: &'static str,
	/// Leading sign for negative numbers.
	pub negative_sign: &'static str,
	/// Text placed after a percentage (`P` format), separator included.
	pub percent_suffix: &'static str,
	/// Symbol used by `%` in custom patterns.
	pub percent_symbol: &'static str,
	/// Rendering of NaN.
	pub nan_symbol: &'static str,
	/// Rendering of positive infinity.
	pub positive_infinity: &'static str,
	/// Rendering of negative infinity.
	pub negative_infinity: &'static str,
}

/// Culture-specific date and time patterns.
///
/// Patterns use custom date format syntax (`dd/MM/yyyy`); `/` and `:`
/// expand to the culture separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
	/// Pattern for `d`.
	pub short_date: &'static str,
	/// Pattern for `D`.
	pub long_date: &'static str,
	/// Pattern for `t`.
	pub short_time: &'static str,
	/// Pattern for `T`.
	pub long_time: &'static str,
	/// Pattern for `M`/`m`.
	pub month_day: &'static str,
	/// Pattern for `Y`/`y`.
	pub year_month: &'static str,
	/// Expansion of `/`.
	pub date_separator: &'static str,
	/// Expansion of `:`.
	pub time_separator: &'static str,
	/// Morning designator (`tt`).
	pub am_designator: &'static str,
	/// Afternoon designator (`tt`).
	pub pm_designator: &'static str,
	/// Full month names, January first.
	pub month_names: [&'static str; 12],
	/// Abbreviated month names, January first.
	pub abbreviated_month_names: [&'static str; 12],
	/// Full day names, Sunday first.
	pub day_names: [&'static str; 7],
	/// Abbreviated day names, Sunday first.
	pub abbreviated_day_names: [&'static str; 7],
}

/// Formatter that may take over rendering of scalar values.
pub trait CustomFormatter: Send + Sync {
	/// Render `value`, or return `None` to fall back to built-in formatting.
	fn format(&self, format: Option<&str>, value: &Scalar, provider: &dyn FormatProvider) -> Option<String>;
}

/// Source of culture-specific formatting information.
pub trait FormatProvider: Send + Sync {
	/// Numeric symbols.
	fn number_format(&self) -> &NumberFormat;

	/// Date and time patterns.
	fn date_time_format(&self) -> &DateTimeFormat;

	/// Optional formatter consulted before built-in scalar formatting.
	fn custom_formatter(&self) -> Option<&dyn CustomFormatter> {
		None
	}
}

/// Built-in culture table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
	name: &'static str,
	number: NumberFormat,
	date_time: DateTimeFormat,
}

const ENGLISH_MONTHS: [&str; 12] = [
	"January",
	"February",
	"March",
	"April",
	"May",
	"June",
	"July",
	"August",
	"September",
	"October",
	"November",
	"December",
];
const ENGLISH_MONTHS_ABBR: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
const ENGLISH_DAYS: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
const ENGLISH_DAYS_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const INVARIANT_NUMBER: NumberFormat = NumberFormat {
	decimal_separator: ".",
	group_separator: ",",
	negative_sign: "-",
	percent_suffix: " %",
	percent_symbol: "%",
	nan_symbol: "NaN",
	positive_infinity: "Infinity",
	negative_infinity: "-Infinity",
};

const INVARIANT_DATE_TIME: DateTimeFormat = DateTimeFormat {
	short_date: "MM/dd/yyyy",
	long_date: "dddd, dd MMMM yyyy",
	short_time: "HH:mm",
	long_time: "HH:mm:ss",
	month_day: "MMMM dd",
	year_month: "yyyy MMMM",
	date_separator: "/",
	time_separator: ":",
	am_designator: "AM",
	pm_designator: "PM",
	month_names: ENGLISH_MONTHS,
	abbreviated_month_names: ENGLISH_MONTHS_ABBR,
	day_names: ENGLISH_DAYS,
	abbreviated_day_names: ENGLISH_DAYS_ABBR,
};

impl Culture {
	/// Culture-neutral formatting: `.` decimals, `MM/dd/yyyy HH:mm:ss` dates.
	pub const fn invariant() -> Self {
		Self {
			name: "",
			number: INVARIANT_NUMBER,
			date_time: INVARIANT_DATE_TIME,
		}
	}

	/// English (United States).
	pub const fn en_us() -> Self {
		Self {
			name: "en-US",
			number: NumberFormat {
				percent_suffix: "%",
				..INVARIANT_NUMBER
			},
			date_time: DateTimeFormat {
				short_date: "M/d/yyyy",
				long_date: "dddd, MMMM d, yyyy",
				short_time: "h:mm tt",
				long_time: "h:mm:ss tt",
				month_day: "MMMM d",
				year_month: "MMMM yyyy",
				..INVARIANT_DATE_TIME
			},
		}
	}

	/// English (United Kingdom).
	pub const fn en_gb() -> Self {
		Self {
			name: "en-GB",
			number: NumberFormat {
				percent_suffix: "%",
				..INVARIANT_NUMBER
			},
			date_time: DateTimeFormat {
				short_date: "dd/MM/yyyy",
				long_date: "dddd, d MMMM yyyy",
				month_day: "d MMMM",
				year_month: "MMMM yyyy",
				am_designator: "am",
				pm_designator: "pm",
				..INVARIANT_DATE_TIME
			},
		}
	}

	/// French (France).
	pub const fn fr_fr() -> Self {
		Self {
			name: "fr-FR",
			number: NumberFormat {
				decimal_separator: ",",
				group_separator: "\u{202f}",
				percent_suffix: "\u{a0}%",
				nan_symbol: "NaN",
				positive_infinity: "∞",
				negative_infinity: "-∞",
				..INVARIANT_NUMBER
			},
			date_time: DateTimeFormat {
				short_date: "dd/MM/yyyy",
				long_date: "dddd d MMMM yyyy",
				month_day: "d MMMM",
				year_month: "MMMM yyyy",
				am_designator: "AM",
				pm_designator: "PM",
				month_names: [
					"janvier",
					"février",
					"mars",
					"avril",
					"mai",
					"juin",
					"juillet",
					"août",
					"septembre",
					"octobre",
					"novembre",
					"décembre",
				],
				abbreviated_month_names: [
					"janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
				],
				day_names: ["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"],
				abbreviated_day_names: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
				..INVARIANT_DATE_TIME
			},
		}
	}

	/// German (Germany).
	pub const fn de_de() -> Self {
		Self {
			name: "de-DE",
			number: NumberFormat {
				decimal_separator: ",",
				group_separator: ".",
				percent_suffix: "\u{a0}%",
				positive_infinity: "∞",
				negative_infinity: "-∞",
				..INVARIANT_NUMBER
			},
			date_time: DateTimeFormat {
				short_date: "dd.MM.yyyy",
				long_date: "dddd, d. MMMM yyyy",
				month_day: "d. MMMM",
				year_month: "MMMM yyyy",
				date_separator: ".",
				month_names: [
					"Januar",
					"Februar",
					"März",
					"April",
					"Mai",
					"Juni",
					"Juli",
					"August",
					"September",
					"Oktober",
					"November",
					"Dezember",
				],
				abbreviated_month_names: ["Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez."],
				day_names: ["Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag"],
				abbreviated_day_names: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
				..INVARIANT_DATE_TIME
			},
		}
	}

	/// Resolve a culture by name (`fr-FR`, `fr_fr`, `fr`); empty or `invariant` selects the invariant culture.
	pub fn from_name(name: &str) -> Result<Self> {
		let normalized = name.trim().replace('_', "-").to_ascii_lowercase();
		let culture = match normalized.as_str() {
			"" | "invariant" => Self::invariant(),
			"en" | "en-us" => Self::en_us(),
			"en-gb" => Self::en_gb(),
			"fr" | "fr-fr" => Self::fr_fr(),
			"de" | "de-de" => Self::de_de(),
			_ => return Err(TemplateError::UnknownCulture { name: name.to_owned() }),
		};
		Ok(culture)
	}

	/// Canonical culture name; empty for the invariant culture.
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl Default for Culture {
	fn default() -> Self {
		Self::invariant()
	}
}

impl FormatProvider for Culture {
	fn number_format(&self) -> &NumberFormat {
		&self.number
	}

	fn date_time_format(&self) -> &DateTimeFormat {
		&self.date_time
	}
}

pub(crate) static INVARIANT: Culture = Culture::invariant();

/// Provider to use when the caller supplied none.
pub(crate) fn provider_or_invariant(provider: Option<&dyn FormatProvider>) -> &dyn FormatProvider {
	match provider {
		Some(provider) => provider,
		None => &INVARIANT,
	}
}

#[cfg(test)]
mod tests;
