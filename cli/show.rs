use std::path::{Path, PathBuf};
use stockcast_common::{
	format_local, load_and_render, ElementId, Labels, LoadError, MemoryView, RenderedPrediction,
};
use stockcast_deps::{reqwest, tokio, url::Url};
use stockcast_util::error::Result;

pub const DEFAULT_PREDICTION_FILE: &str = "docs/prediction.json";

pub enum Source {
	File(PathBuf),
	Url(Url),
}

/// Load a record and print what the page would show for it.
pub fn show(source: Source, labels: Option<&str>) -> Result<Option<RenderedPrediction>> {
	let labels = Labels::from_attribute(labels);
	let body = match source {
		Source::File(path) => read_file(&path),
		Source::Url(url) => {
			let mut runtime = tokio::runtime::Runtime::new()?;
			runtime.block_on(fetch_url(url))
		}
	};
	let mut view = MemoryView::new();
	let rendered = load_and_render(&mut view, &labels, body, &format_local);
	print!("{}", describe(&view));
	Ok(rendered)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
	std::fs::read_to_string(path)
		.map_err(|error| LoadError::Fetch(format!("{}: {}", path.display(), error)))
}

async fn fetch_url(url: Url) -> Result<String, LoadError> {
	let response = reqwest::get(url)
		.await
		.map_err(|error| LoadError::Fetch(error.to_string()))?;
	if !response.status().is_success() {
		return Err(LoadError::Status(response.status().as_u16()));
	}
	response
		.text()
		.await
		.map_err(|error| LoadError::Fetch(error.to_string()))
}

/// One line per element that has been written to, with the prediction's class in brackets.
fn describe(view: &MemoryView) -> String {
	let mut output = String::new();
	if let Some(text) = view.text_content(ElementId::Prediction) {
		output.push_str(text);
		match view.class_name(ElementId::Prediction) {
			Some(class_name) if !class_name.is_empty() => {
				output.push_str(&format!(" [{}]", class_name));
			}
			_ => {}
		}
		output.push('\n');
	}
	for element in &[ElementId::Date, ElementId::Timestamp] {
		if let Some(text) = view.text_content(*element) {
			output.push_str(text);
			output.push('\n');
		}
	}
	output
}

#[test]
fn test_describe() {
	use stockcast_common::PredictionView;
	let mut view = MemoryView::new();
	view.set_text_content(ElementId::Prediction, "📈 Market will go UP");
	view.set_class_name(ElementId::Prediction, "up");
	view.set_text_content(ElementId::Date, "Prediction Date: 2024-01-01");
	view.set_text_content(ElementId::Timestamp, "Last Updated: 1/1/2024, 12:00:00 AM");
	assert_eq!(
		describe(&view),
		"📈 Market will go UP [up]\nPrediction Date: 2024-01-01\nLast Updated: 1/1/2024, 12:00:00 AM\n"
	);
	let mut view = MemoryView::new();
	view.set_text_content(ElementId::Prediction, "Error loading prediction.");
	assert_eq!(describe(&view), "Error loading prediction.\n");
}

#[test]
fn test_show_missing_file() {
	let path = std::env::temp_dir().join("stockcast-show-missing").join("prediction.json");
	let rendered = show(Source::File(path), None).unwrap();
	assert!(rendered.is_none());
}
