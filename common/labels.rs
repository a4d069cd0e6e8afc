use crate::Direction;
use serde::Deserialize;

/// The fixed text the page is rendered with. A host page can override any of these by putting a json object in the `data-labels` attribute of the prediction element.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Labels {
	pub up: String,
	pub down: String,
	pub error: String,
	pub date_label: String,
	pub timestamp_label: String,
}

impl Default for Labels {
	fn default() -> Labels {
		Labels {
			up: "📈 Market will go UP".to_owned(),
			down: "📉 Market will go DOWN".to_owned(),
			error: "Error loading prediction.".to_owned(),
			date_label: "Prediction Date: ".to_owned(),
			timestamp_label: "Last Updated: ".to_owned(),
		}
	}
}

impl Labels {
	pub fn from_json(json: &str) -> serde_json::Result<Labels> {
		serde_json::from_str(json)
	}

	/// Read the overrides from a `data-labels` attribute, falling back to the defaults if it is absent or invalid.
	pub fn from_attribute(attribute: Option<&str>) -> Labels {
		match attribute {
			None => Labels::default(),
			Some(json) => Labels::from_json(json).unwrap_or_else(|error| {
				log::warn!("ignoring invalid data-labels attribute: {}", error);
				Labels::default()
			}),
		}
	}

	pub fn phrase(&self, direction: Direction) -> &str {
		match direction {
			Direction::Up => &self.up,
			Direction::Down => &self.down,
		}
	}
}

#[test]
fn test_labels_from_attribute() {
	assert_eq!(Labels::from_attribute(None), Labels::default());
	let labels = Labels::from_attribute(Some(
		r#"{"up": "Apple Inc share is expected to go UP", "down": "Apple Inc share is expected to go DOWN"}"#,
	));
	assert_eq!(labels.phrase(Direction::Up), "Apple Inc share is expected to go UP");
	assert_eq!(labels.phrase(Direction::Down), "Apple Inc share is expected to go DOWN");
	assert_eq!(labels.error, "Error loading prediction.");
	assert_eq!(labels.date_label, "Prediction Date: ");
	assert_eq!(Labels::from_attribute(Some("{not json")), Labels::default());
}
