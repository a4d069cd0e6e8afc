use std::collections::BTreeMap;

/// The three elements the host page exposes to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ElementId {
	Prediction,
	Date,
	Timestamp,
}

impl ElementId {
	pub fn id(self) -> &'static str {
		match self {
			ElementId::Prediction => "prediction",
			ElementId::Date => "date",
			ElementId::Timestamp => "timestamp",
		}
	}
}

/// The renderer writes through a view. In the browser this is the document, natively it is a `MemoryView`.
pub trait PredictionView {
	fn set_text_content(&mut self, element: ElementId, text: &str);
	fn set_class_name(&mut self, element: ElementId, class_name: &str);
}

#[derive(Clone, Debug, Default, PartialEq)]
struct MemoryElement {
	text_content: String,
	class_name: String,
}

/// A view that keeps the content of each element in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryView {
	elements: BTreeMap<ElementId, MemoryElement>,
}

impl MemoryView {
	pub fn new() -> MemoryView {
		MemoryView::default()
	}

	pub fn text_content(&self, element: ElementId) -> Option<&str> {
		self.elements
			.get(&element)
			.map(|element| element.text_content.as_str())
	}

	pub fn class_name(&self, element: ElementId) -> Option<&str> {
		self.elements
			.get(&element)
			.map(|element| element.class_name.as_str())
	}
}

impl PredictionView for MemoryView {
	fn set_text_content(&mut self, element: ElementId, text: &str) {
		self.elements.entry(element).or_default().text_content = text.to_owned();
	}

	fn set_class_name(&mut self, element: ElementId, class_name: &str) {
		self.elements.entry(element).or_default().class_name = class_name.to_owned();
	}
}

#[test]
fn test_memory_view() {
	let mut view = MemoryView::new();
	assert_eq!(view.text_content(ElementId::Date), None);
	view.set_text_content(ElementId::Date, "Prediction Date: 2024-01-01");
	view.set_class_name(ElementId::Prediction, "up");
	assert_eq!(
		view.text_content(ElementId::Date),
		Some("Prediction Date: 2024-01-01")
	);
	assert_eq!(view.class_name(ElementId::Prediction), Some("up"));
	assert_eq!(view.text_content(ElementId::Prediction), Some(""));
	assert_eq!(view.class_name(ElementId::Timestamp), None);
}
