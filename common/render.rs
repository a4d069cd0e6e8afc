use crate::{ElementId, Labels, LoadError, PredictionRecord, PredictionView, UpdatedAt};

/// Everything the page shows for a successfully loaded record, computed before anything is written so a failure can never leave the page half rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPrediction {
	pub prediction_text: String,
	pub prediction_class_name: String,
	pub date_text: String,
	pub timestamp_text: String,
}

impl RenderedPrediction {
	pub fn new(
		record: &PredictionRecord,
		labels: &Labels,
		format_local: &dyn Fn(UpdatedAt) -> String,
	) -> RenderedPrediction {
		if !record.is_recognized() {
			log::warn!(
				"unrecognized prediction \"{}\", rendering it as down",
				record.prediction
			);
		}
		RenderedPrediction {
			prediction_text: labels.phrase(record.direction()).to_owned(),
			prediction_class_name: record.class_name(),
			date_text: format!("{}{}", labels.date_label, record.date_text()),
			timestamp_text: format!(
				"{}{}",
				labels.timestamp_label,
				format_local(record.updated_at())
			),
		}
	}

	pub fn write(&self, view: &mut dyn PredictionView) {
		view.set_text_content(ElementId::Prediction, &self.prediction_text);
		view.set_class_name(ElementId::Prediction, &self.prediction_class_name);
		view.set_text_content(ElementId::Date, &self.date_text);
		view.set_text_content(ElementId::Timestamp, &self.timestamp_text);
	}
}

/// Show the error message in place of the prediction. The date and timestamp elements are left as they are.
pub fn render_error(view: &mut dyn PredictionView, labels: &Labels, error: &LoadError) {
	view.set_text_content(ElementId::Prediction, &labels.error);
	log::error!("Prediction load failed: {}", error);
}

/// Render the outcome of fetching `prediction.json`. `body` is the response body, or the error that prevented getting one.
pub fn load_and_render(
	view: &mut dyn PredictionView,
	labels: &Labels,
	body: Result<String, LoadError>,
	format_local: &dyn Fn(UpdatedAt) -> String,
) -> Option<RenderedPrediction> {
	let record = body.and_then(|body| PredictionRecord::from_json(&body));
	match record {
		Ok(record) => {
			let rendered = RenderedPrediction::new(&record, labels, format_local);
			rendered.write(view);
			Some(rendered)
		}
		Err(error) => {
			render_error(view, labels, &error);
			None
		}
	}
}

#[cfg(test)]
fn format_utc(updated_at: UpdatedAt) -> String {
	crate::format_updated_at_in(updated_at, &chrono::Utc)
}

#[cfg(test)]
fn record_json(prediction: &str) -> Result<String, LoadError> {
	Ok(format!(
		r#"{{"prediction": "{}", "date": "2024-01-01", "updated_at": "2024-01-01T00:00:00Z"}}"#,
		prediction
	))
}

#[cfg(test)]
fn view_with_placeholders() -> crate::MemoryView {
	let mut view = crate::MemoryView::new();
	view.set_text_content(ElementId::Prediction, "Loading...");
	view.set_text_content(ElementId::Date, "Prediction Date: --");
	view.set_text_content(ElementId::Timestamp, "Last Updated: --");
	view
}

#[test]
fn test_render_up() {
	let mut view = view_with_placeholders();
	load_and_render(&mut view, &Labels::default(), record_json("Up"), &format_utc);
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("📈 Market will go UP")
	);
	assert_eq!(view.class_name(ElementId::Prediction), Some("up"));
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date: 2024-01-01")
	);
	assert_eq!(
		view.text_content(ElementId::Timestamp),
		Some("Last Updated: 1/1/2024, 12:00:00 AM")
	);
}

#[test]
fn test_render_down() {
	let mut view = view_with_placeholders();
	load_and_render(&mut view, &Labels::default(), record_json("Down"), &format_utc);
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("📉 Market will go DOWN")
	);
	assert_eq!(view.class_name(ElementId::Prediction), Some("down"));
}

#[test]
fn test_render_unrecognized_prediction_as_down() {
	let mut view = view_with_placeholders();
	let rendered = load_and_render(
		&mut view,
		&Labels::default(),
		record_json("Unknown"),
		&format_utc,
	);
	assert!(rendered.is_some());
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("📉 Market will go DOWN")
	);
	assert_eq!(view.class_name(ElementId::Prediction), Some("unknown"));
}

#[test]
fn test_render_date_verbatim() {
	let mut view = view_with_placeholders();
	let body = r#"{"prediction": "Up", "date": " Friday, 5th of January ", "updated_at": "2024-01-05"}"#;
	load_and_render(&mut view, &Labels::default(), Ok(body.to_owned()), &format_utc);
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date:  Friday, 5th of January ")
	);
}

#[test]
fn test_render_invalid_updated_at() {
	let mut view = view_with_placeholders();
	let body = r#"{"prediction": "Up", "date": "2024-01-01", "updated_at": "soon"}"#;
	load_and_render(&mut view, &Labels::default(), Ok(body.to_owned()), &format_utc);
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("📈 Market will go UP")
	);
	assert_eq!(
		view.text_content(ElementId::Timestamp),
		Some("Last Updated: Invalid Date")
	);
}

#[test]
fn test_render_fetch_error() {
	let mut view = view_with_placeholders();
	let rendered = load_and_render(
		&mut view,
		&Labels::default(),
		Err(LoadError::Fetch("Failed to fetch".to_owned())),
		&format_utc,
	);
	assert!(rendered.is_none());
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("Error loading prediction.")
	);
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date: --")
	);
	assert_eq!(
		view.text_content(ElementId::Timestamp),
		Some("Last Updated: --")
	);
}

#[test]
fn test_render_http_error() {
	let mut view = view_with_placeholders();
	load_and_render(
		&mut view,
		&Labels::default(),
		Err(LoadError::Status(404)),
		&format_utc,
	);
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("Error loading prediction.")
	);
	assert_eq!(view.class_name(ElementId::Prediction), Some(""));
}

#[test]
fn test_render_invalid_json() {
	let mut view = view_with_placeholders();
	load_and_render(
		&mut view,
		&Labels::default(),
		Ok("<!DOCTYPE html><p>Not Found</p>".to_owned()),
		&format_utc,
	);
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("Error loading prediction.")
	);
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date: --")
	);
	assert_eq!(
		view.text_content(ElementId::Timestamp),
		Some("Last Updated: --")
	);
}

#[test]
fn test_render_is_idempotent() {
	let mut view = view_with_placeholders();
	load_and_render(&mut view, &Labels::default(), record_json("Up"), &format_utc);
	let first = view.clone();
	load_and_render(&mut view, &Labels::default(), record_json("Up"), &format_utc);
	assert_eq!(view, first);
}

#[test]
fn test_render_with_labels() {
	let mut view = view_with_placeholders();
	let labels = Labels::from_attribute(Some(
		r#"{"up": "Apple Inc share is expected to go UP", "date_label": "Date: "}"#,
	));
	load_and_render(&mut view, &labels, record_json("Up"), &format_utc);
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("Apple Inc share is expected to go UP")
	);
	assert_eq!(view.text_content(ElementId::Date), Some("Date: 2024-01-01"));
}

#[test]
fn test_render_loose_fields() {
	let mut view = view_with_placeholders();
	let body = r#"{"prediction": "Up", "date": "2024-01-01", "updated_at": 1704067200000}"#;
	let rendered = load_and_render(&mut view, &Labels::default(), Ok(body.to_owned()), &format_utc);
	assert!(rendered.is_some());
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("📈 Market will go UP")
	);
	assert_eq!(
		view.text_content(ElementId::Timestamp),
		Some("Last Updated: 1/1/2024, 12:00:00 AM")
	);
	let body = r#"{"prediction": "Up", "updated_at": "2024-01-01T00:00:00Z"}"#;
	load_and_render(&mut view, &Labels::default(), Ok(body.to_owned()), &format_utc);
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date: undefined")
	);
	let body = r#"{"prediction": "Down", "date": 20240101, "updated_at": "2024-01-01T00:00:00Z"}"#;
	load_and_render(&mut view, &Labels::default(), Ok(body.to_owned()), &format_utc);
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date: 20240101")
	);
	assert_eq!(view.class_name(ElementId::Prediction), Some("down"));
}

#[test]
fn test_render_non_string_prediction_fails() {
	let mut view = view_with_placeholders();
	let body = r#"{"prediction": 1, "date": "2024-01-01", "updated_at": "2024-01-01T00:00:00Z"}"#;
	let rendered = load_and_render(&mut view, &Labels::default(), Ok(body.to_owned()), &format_utc);
	assert!(rendered.is_none());
	assert_eq!(
		view.text_content(ElementId::Prediction),
		Some("Error loading prediction.")
	);
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date: --")
	);
}
