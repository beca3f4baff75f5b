use crate::document::name::normalize_name;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::{Chars, FromStr};

/// Date-time layouts accepted by [`Entry::to_datetime`], tried in order.
const DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%d %H:%M",
	"%Y-%m-%dT%H:%M",
	"%Y/%m/%d %H:%M:%S",
	"%Y/%m/%d %H:%M",
];

/// Date-only layouts accepted by [`Entry::to_datetime`], read as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Layouts with a numeric offset, as `DateTime<FixedOffset>` and
/// `DateTime<Local>` display themselves.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %:z", "%Y-%m-%d %H:%M:%S%.f %:z"];

/// Suffix `DateTime<Utc>` appends when displayed.
const UTC_SUFFIX: &str = " UTC";

/// A single name/value pair within a section.
///
/// The value is always stored as text. Anything written into an entry is
/// converted with its `Display` form at write time, so `true` and `"true"`
/// are indistinguishable afterwards. The typed `to_*` views parse that text
/// on demand and fall back to a zero value instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	name: String,
	value: String,
}

impl Entry {
	/// Create an entry, normalizing the name and stringifying the value.
	pub fn new(name: &str, value: impl fmt::Display) -> Self {
		Entry {
			name: normalize_name(name),
			value: value.to_string(),
		}
	}

	/// The normalized (lowercase) entry name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The stored text value.
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Replace the value with the text form of `value`.
	pub fn set_value(&mut self, value: impl fmt::Display) {
		self.value = value.to_string();
	}

	pub(crate) fn set_name(&mut self, name: &str) {
		self.name = normalize_name(name);
	}

	/// Parse the value as `T`, yielding `T::default()` when it does not parse.
	///
	/// Surrounding whitespace is ignored.
	pub fn parse_or_default<T>(&self) -> T
	where
		T: FromStr + Default,
	{
		self.value.trim().parse().unwrap_or_default()
	}

	pub fn to_i32(&self) -> i32 {
		self.parse_or_default()
	}

	pub fn to_u32(&self) -> u32 {
		self.parse_or_default()
	}

	pub fn to_i64(&self) -> i64 {
		self.parse_or_default()
	}

	pub fn to_u64(&self) -> u64 {
		self.parse_or_default()
	}

	pub fn to_i16(&self) -> i16 {
		self.parse_or_default()
	}

	pub fn to_u16(&self) -> u16 {
		self.parse_or_default()
	}

	/// True for `true`, `on` and `1` in any letter case; false for anything else.
	pub fn to_bool(&self) -> bool {
		matches!(self.value.to_lowercase().as_str(), "true" | "on" | "1")
	}

	/// Best-effort date-time parse.
	///
	/// Accepts RFC 3339, ISO-like `YYYY-MM-DD HH:MM[:SS[.fff]]` (space or `T`
	/// separated), slash-separated dates and bare dates (read as midnight).
	/// A trailing ` UTC` or numeric offset such as ` +02:00` is accepted, so
	/// chrono's offset-aware values read back as their wall-clock time.
	/// Anything else yields the Unix epoch, `1970-01-01 00:00:00`.
	pub fn to_datetime(&self) -> NaiveDateTime {
		let text = self.value.trim();

		if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
			return dt.naive_local();
		}

		if let Some(dt) = OFFSET_FORMATS
			.iter()
			.find_map(|format| DateTime::parse_from_str(text, format).ok())
		{
			return dt.naive_local();
		}

		parse_naive(text.strip_suffix(UTC_SUFFIX).unwrap_or(text)).unwrap_or_default()
	}

	/// The raw value as a sequence of characters.
	pub fn chars(&self) -> Chars<'_> {
		self.value.chars()
	}
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
	DATETIME_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
		.or_else(|| {
			DATE_FORMATS.iter().find_map(|format| {
				NaiveDate::parse_from_str(text, format)
					.ok()
					.map(|date| date.and_time(NaiveTime::MIN))
			})
		})
}

impl fmt::Display for Entry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.value)
	}
}
