use crate::{LoadError, UpdatedAt};
use chrono::{prelude::*, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The contents of `prediction.json`. `prediction` must be a string, the other fields may be any json value or absent, and are displayed the way a browser would interpolate them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PredictionRecord {
	pub prediction: String,
	#[serde(
		default,
		deserialize_with = "deserialize_present",
		skip_serializing_if = "Option::is_none"
	)]
	pub date: Option<Value>,
	#[serde(
		default,
		deserialize_with = "deserialize_present",
		skip_serializing_if = "Option::is_none"
	)]
	pub updated_at: Option<Value>,
}

/// Keep an explicit `null` as `Some(Value::Null)`, so only an absent field is `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
	D: Deserializer<'de>,
{
	Value::deserialize(deserializer).map(Some)
}

/// The text a browser produces when interpolating `value` into a template string.
pub fn display_text(value: Option<&Value>) -> String {
	match value {
		None => "undefined".to_owned(),
		Some(Value::Null) => "null".to_owned(),
		Some(Value::Bool(value)) => value.to_string(),
		Some(Value::Number(value)) => value.to_string(),
		Some(Value::String(value)) => value.clone(),
		Some(Value::Array(values)) => values
			.iter()
			.map(|value| match value {
				Value::Null => String::new(),
				value => display_text(Some(value)),
			})
			.collect::<Vec<_>>()
			.join(","),
		Some(Value::Object(_)) => "[object Object]".to_owned(),
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Up,
	Down,
}

impl Direction {
	/// Only the exact value `"Up"` is up. Everything else, including values that are not a direction at all, is down.
	pub fn from_prediction(prediction: &str) -> Direction {
		if prediction == "Up" {
			Direction::Up
		} else {
			Direction::Down
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Direction::Up => "Up",
			Direction::Down => "Down",
		}
	}
}

impl std::str::FromStr for Direction {
	type Err = String;
	fn from_str(value: &str) -> Result<Direction, String> {
		match value.to_lowercase().as_str() {
			"up" => Ok(Direction::Up),
			"down" => Ok(Direction::Down),
			_ => Err(format!("\"{}\" is not a direction, expected up or down", value)),
		}
	}
}

impl PredictionRecord {
	/// A record as the publisher writes it: `updated_at` is utc with microseconds and a `Z` suffix.
	pub fn new(direction: Direction, date: String, updated_at: DateTime<Utc>) -> PredictionRecord {
		PredictionRecord {
			prediction: direction.as_str().to_owned(),
			date: Some(Value::String(date)),
			updated_at: Some(Value::String(
				updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
			)),
		}
	}

	pub fn from_json(json: &str) -> Result<PredictionRecord, LoadError> {
		let record = serde_json::from_str(json)?;
		Ok(record)
	}

	pub fn date_text(&self) -> String {
		display_text(self.date.as_ref())
	}

	pub fn updated_at(&self) -> UpdatedAt {
		UpdatedAt::from_value(self.updated_at.as_ref())
	}

	pub fn direction(&self) -> Direction {
		Direction::from_prediction(&self.prediction)
	}

	/// Whether `prediction` is one of the two values the producer is expected to write.
	pub fn is_recognized(&self) -> bool {
		self.prediction == Direction::Up.as_str() || self.prediction == Direction::Down.as_str()
	}

	/// The class name for the prediction element is the lowercased prediction, whatever it is.
	pub fn class_name(&self) -> String {
		self.prediction.to_lowercase()
	}
}

#[test]
fn test_direction_from_prediction() {
	assert_eq!(Direction::from_prediction("Up"), Direction::Up);
	assert_eq!(Direction::from_prediction("Down"), Direction::Down);
	assert_eq!(Direction::from_prediction("up"), Direction::Down);
	assert_eq!(Direction::from_prediction("Unknown"), Direction::Down);
	assert_eq!(Direction::from_prediction(""), Direction::Down);
}

#[test]
fn test_direction_from_str() {
	assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
	assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
	assert!("sideways".parse::<Direction>().is_err());
}

#[test]
fn test_record_new() {
	let updated_at = Utc.ymd(2024, 1, 2).and_hms_micro(21, 30, 0, 42);
	let record = PredictionRecord::new(Direction::Down, "2024-01-02".to_owned(), updated_at);
	assert_eq!(record.prediction, "Down");
	assert_eq!(record.updated_at(), UpdatedAt::Text("2024-01-02T21:30:00.000042Z"));
	assert_eq!(
		serde_json::to_string(&record).unwrap(),
		r#"{"prediction":"Down","date":"2024-01-02","updated_at":"2024-01-02T21:30:00.000042Z"}"#
	);
}

#[test]
fn test_record_from_json() {
	let record = PredictionRecord::from_json(
		r#"{"prediction": "Up", "date": "2024-01-01", "updated_at": "2024-01-01T00:00:00Z"}"#,
	)
	.unwrap();
	assert_eq!(record.direction(), Direction::Up);
	assert_eq!(record.class_name(), "up");
	assert_eq!(record.date_text(), "2024-01-01");
	assert!(record.is_recognized());
	let record = PredictionRecord::from_json(
		r#"{"prediction": "Unknown", "date": "2024-01-01", "updated_at": "2024-01-01T00:00:00Z"}"#,
	)
	.unwrap();
	assert_eq!(record.direction(), Direction::Down);
	assert_eq!(record.class_name(), "unknown");
	assert!(!record.is_recognized());
	assert!(PredictionRecord::from_json("<html>not found</html>").is_err());
	assert!(PredictionRecord::from_json(r#"{"date": "2024-01-01"}"#).is_err());
	assert!(PredictionRecord::from_json(r#"{"prediction": 1, "date": "2024-01-01"}"#).is_err());
	assert!(PredictionRecord::from_json(r#"{"prediction": null}"#).is_err());
}

#[test]
fn test_record_from_json_with_loose_fields() {
	let record = PredictionRecord::from_json(r#"{"prediction": "Up"}"#).unwrap();
	assert_eq!(record.date, None);
	assert_eq!(record.date_text(), "undefined");
	assert_eq!(record.updated_at(), UpdatedAt::Invalid);
	let record = PredictionRecord::from_json(
		r#"{"prediction": "Down", "date": 20240101, "updated_at": 1704067200000}"#,
	)
	.unwrap();
	assert_eq!(record.date_text(), "20240101");
	assert_eq!(record.updated_at(), UpdatedAt::Millis(1_704_067_200_000.0));
	let record =
		PredictionRecord::from_json(r#"{"prediction": "Down", "date": null, "updated_at": null}"#)
			.unwrap();
	assert_eq!(record.date_text(), "null");
	assert_eq!(record.updated_at(), UpdatedAt::Millis(0.0));
}

#[test]
fn test_display_text() {
	assert_eq!(display_text(None), "undefined");
	assert_eq!(display_text(Some(&serde_json::json!(true))), "true");
	assert_eq!(display_text(Some(&serde_json::json!(1.5))), "1.5");
	assert_eq!(display_text(Some(&serde_json::json!(["a", null, 2]))), "a,,2");
	assert_eq!(display_text(Some(&serde_json::json!({"a": 1}))), "[object Object]");
}
