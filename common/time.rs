use chrono::prelude::*;
use serde_json::Value;

/// What a browser shows for a date it could not parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// The raw `updated_at` value, in the two shapes a browser `Date` can be constructed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdatedAt<'a> {
	Text(&'a str),
	/// Milliseconds since the unix epoch.
	Millis(f64),
	Invalid,
}

impl<'a> UpdatedAt<'a> {
	/// Mirror `new Date(value)`: strings are parsed, numbers are epoch milliseconds, `null` is the epoch and a missing value is invalid.
	pub fn from_value(value: Option<&'a Value>) -> UpdatedAt<'a> {
		match value {
			None => UpdatedAt::Invalid,
			Some(Value::Null) => UpdatedAt::Millis(0.0),
			Some(Value::Bool(value)) => UpdatedAt::Millis(if *value { 1.0 } else { 0.0 }),
			Some(Value::Number(value)) => value
				.as_f64()
				.map(UpdatedAt::Millis)
				.unwrap_or(UpdatedAt::Invalid),
			Some(Value::String(value)) => UpdatedAt::Text(value),
			Some(Value::Array(_)) | Some(Value::Object(_)) => UpdatedAt::Invalid,
		}
	}
}

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%d %H:%M",
	"%Y/%m/%d %H:%M:%S",
	"%m/%d/%Y %H:%M:%S",
	"%B %d, %Y %H:%M:%S",
	"%b %d, %Y %H:%M:%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Parse an `updated_at` value the way a browser does. Values without an offset are in `timezone`, except a bare iso date, which is utc.
pub fn parse_updated_at<Tz: TimeZone>(updated_at: UpdatedAt, timezone: &Tz) -> Option<DateTime<Utc>> {
	match updated_at {
		UpdatedAt::Text(text) => parse_text(text, timezone),
		UpdatedAt::Millis(millis) if millis.is_finite() => {
			Utc.timestamp_millis_opt(millis.trunc() as i64).single()
		}
		_ => None,
	}
}

fn parse_text<Tz: TimeZone>(text: &str, timezone: &Tz) -> Option<DateTime<Utc>> {
	let text = text.trim();
	if let Ok(date) = DateTime::parse_from_rfc3339(text) {
		return Some(date.with_timezone(&Utc));
	}
	if let Ok(date) = DateTime::parse_from_rfc2822(text) {
		return Some(date.with_timezone(&Utc));
	}
	if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
		return Some(DateTime::from_utc(date.and_hms(0, 0, 0), Utc));
	}
	match strip_utc_suffix(text) {
		Some(text) => parse_naive(text).map(|date| DateTime::from_utc(date, Utc)),
		None => parse_naive(text).and_then(|date| {
			timezone
				.from_local_datetime(&date)
				.earliest()
				.map(|date| date.with_timezone(&Utc))
		}),
	}
}

fn strip_utc_suffix(text: &str) -> Option<&str> {
	[" UTC", " GMT", "Z"]
		.iter()
		.find_map(|suffix| text.strip_suffix(suffix))
		.map(|text| text.trim_end())
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
	NAIVE_DATE_TIME_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
		.or_else(|| {
			NAIVE_DATE_FORMATS
				.iter()
				.find_map(|format| NaiveDate::parse_from_str(text, format).ok())
				.map(|date| date.and_hms(0, 0, 0))
		})
}

/// Render `updated_at` in the local timezone the way an en-US browser's `toLocaleString` does.
pub fn format_local(updated_at: UpdatedAt) -> String {
	format_updated_at_in(updated_at, &Local)
}

pub fn format_updated_at_in<Tz: TimeZone>(updated_at: UpdatedAt, timezone: &Tz) -> String
where
	Tz::Offset: std::fmt::Display,
{
	match parse_updated_at(updated_at, timezone) {
		Some(date) => format_in_timezone(date, timezone),
		None => INVALID_DATE.to_owned(),
	}
}

pub fn format_in_timezone<Tz: TimeZone>(date: DateTime<Utc>, timezone: &Tz) -> String
where
	Tz::Offset: std::fmt::Display,
{
	date.with_timezone(timezone)
		.format("%-m/%-d/%Y, %-I:%M:%S %p")
		.to_string()
}

#[test]
fn test_updated_at_from_value() {
	let text = Value::String("2024-01-01".to_owned());
	assert_eq!(UpdatedAt::from_value(Some(&text)), UpdatedAt::Text("2024-01-01"));
	let millis = serde_json::json!(1704067200000u64);
	assert_eq!(
		UpdatedAt::from_value(Some(&millis)),
		UpdatedAt::Millis(1_704_067_200_000.0)
	);
	assert_eq!(UpdatedAt::from_value(Some(&Value::Null)), UpdatedAt::Millis(0.0));
	assert_eq!(UpdatedAt::from_value(None), UpdatedAt::Invalid);
	assert_eq!(
		UpdatedAt::from_value(Some(&serde_json::json!({}))),
		UpdatedAt::Invalid
	);
}

#[test]
fn test_parse_updated_at() {
	let expected = Utc.ymd(2024, 1, 1).and_hms(0, 0, 0);
	let parse = |text| parse_updated_at(UpdatedAt::Text(text), &Utc);
	assert_eq!(parse("2024-01-01T00:00:00Z"), Some(expected));
	assert_eq!(parse("2024-01-01T01:00:00+01:00"), Some(expected));
	assert_eq!(parse("2024-01-01T00:00:00"), Some(expected));
	assert_eq!(parse("2024-01-01 00:00:00"), Some(expected));
	assert_eq!(parse("2024-01-01"), Some(expected));
	assert_eq!(parse("Mon, 01 Jan 2024 00:00:00 GMT"), Some(expected));
	assert_eq!(parse("2024/01/01"), Some(expected));
	assert_eq!(parse("January 1, 2024 00:00:00 UTC"), Some(expected));
	assert_eq!(parse("Jan 1, 2024"), Some(expected));
	assert_eq!(
		parse("2024-01-01T00:00:00.123456+00:00"),
		Some(Utc.ymd(2024, 1, 1).and_hms_micro(0, 0, 0, 123_456))
	);
	assert_eq!(parse("yesterday"), None);
	assert_eq!(parse(""), None);
	assert_eq!(
		parse_updated_at(UpdatedAt::Millis(1_704_067_200_000.0), &Utc),
		Some(expected)
	);
	assert_eq!(parse_updated_at(UpdatedAt::Millis(f64::NAN), &Utc), None);
	assert_eq!(parse_updated_at(UpdatedAt::Invalid, &Utc), None);
}

#[test]
fn test_parse_updated_at_without_offset_is_local() {
	let paris = FixedOffset::east(3600);
	let local_midnight = Utc.ymd(2023, 12, 31).and_hms(23, 0, 0);
	let parse = |text| parse_updated_at(UpdatedAt::Text(text), &paris);
	assert_eq!(parse("2024-01-01T00:00:00"), Some(local_midnight));
	assert_eq!(parse("2024/01/01"), Some(local_midnight));
	assert_eq!(parse("January 1, 2024 00:00:00"), Some(local_midnight));
	// An iso date on its own and anything with an offset are not local.
	assert_eq!(parse("2024-01-01"), Some(Utc.ymd(2024, 1, 1).and_hms(0, 0, 0)));
	assert_eq!(
		parse("January 1, 2024 00:00:00 UTC"),
		Some(Utc.ymd(2024, 1, 1).and_hms(0, 0, 0))
	);
	assert_eq!(
		parse("Mon, 01 Jan 2024 00:00:00 GMT"),
		Some(Utc.ymd(2024, 1, 1).and_hms(0, 0, 0))
	);
}

#[test]
fn test_format_updated_at() {
	assert_eq!(
		format_updated_at_in(UpdatedAt::Text("2024-01-01T00:00:00Z"), &Utc),
		"1/1/2024, 12:00:00 AM"
	);
	assert_eq!(
		format_updated_at_in(UpdatedAt::Text("2024-07-04T15:05:09Z"), &Utc),
		"7/4/2024, 3:05:09 PM"
	);
	assert_eq!(
		format_updated_at_in(UpdatedAt::Text("not a date"), &Utc),
		INVALID_DATE
	);
	let new_york = FixedOffset::west(5 * 3600);
	assert_eq!(
		format_updated_at_in(UpdatedAt::Text("2024-01-01T00:00:00Z"), &new_york),
		"12/31/2023, 7:00:00 PM"
	);
	assert_eq!(
		format_updated_at_in(UpdatedAt::Text("2024-01-01T00:00:00"), &new_york),
		"1/1/2024, 12:00:00 AM"
	);
}
