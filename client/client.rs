use stockcast_common::{
	ElementId, Labels, LoadError, PredictionView, UpdatedAt, INVALID_DATE, PREDICTION_PATH,
};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};

mod console;

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
	console::init();
	let document = match web_sys::window().and_then(|window| window.document()) {
		Some(document) => document,
		None => return,
	};
	// The module may start before or after the document has been parsed.
	if document.ready_state() == "loading" {
		let callback = Closure::once_into_js(move || spawn_local(load_and_render()));
		if let Err(error) =
			document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
		{
			log::error!("failed to listen for DOMContentLoaded: {}", describe(error));
		}
	} else {
		spawn_local(load_and_render());
	}
}

async fn load_and_render() {
	let document = match web_sys::window().and_then(|window| window.document()) {
		Some(document) => document,
		None => return,
	};
	let mut view = DocumentView { document };
	let labels = view.labels();
	let body = fetch_text(PREDICTION_PATH).await;
	stockcast_common::load_and_render(&mut view, &labels, body, &format_local);
}

async fn fetch_text(path: &str) -> Result<String, LoadError> {
	let window =
		web_sys::window().ok_or_else(|| LoadError::Fetch("there is no window".to_owned()))?;
	let response = JsFuture::from(window.fetch_with_str(path))
		.await
		.map_err(network_error)?
		.dyn_into::<web_sys::Response>()
		.map_err(network_error)?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}
	let text = JsFuture::from(response.text().map_err(network_error)?)
		.await
		.map_err(network_error)?;
	text.as_string()
		.ok_or_else(|| LoadError::Fetch("the response body is not text".to_owned()))
}

/// Hand `updated_at` to the browser's own `Date` parser and render it with `toLocaleString`, so the viewer sees their own locale and timezone.
fn format_local(updated_at: UpdatedAt) -> String {
	let date = match updated_at {
		UpdatedAt::Text(text) => js_sys::Date::new(&JsValue::from_str(text)),
		UpdatedAt::Millis(millis) => js_sys::Date::new(&JsValue::from_f64(millis)),
		UpdatedAt::Invalid => return INVALID_DATE.to_owned(),
	};
	if date.get_time().is_nan() {
		return INVALID_DATE.to_owned();
	}
	date.to_locale_string("default", &JsValue::UNDEFINED).into()
}

struct DocumentView {
	document: web_sys::Document,
}

impl DocumentView {
	fn element(&self, element: ElementId) -> Option<web_sys::Element> {
		let found = self.document.get_element_by_id(element.id());
		if found.is_none() {
			log::warn!("the page has no element with id \"{}\"", element.id());
		}
		found
	}

	fn labels(&self) -> Labels {
		let attribute = self
			.document
			.get_element_by_id(ElementId::Prediction.id())
			.and_then(|element| element.get_attribute("data-labels"));
		Labels::from_attribute(attribute.as_deref())
	}
}

impl PredictionView for DocumentView {
	fn set_text_content(&mut self, element: ElementId, text: &str) {
		if let Some(element) = self.element(element) {
			element.set_text_content(Some(text));
		}
	}

	fn set_class_name(&mut self, element: ElementId, class_name: &str) {
		if let Some(element) = self.element(element) {
			element.set_class_name(class_name);
		}
	}
}

fn network_error(value: JsValue) -> LoadError {
	LoadError::Fetch(describe(value))
}

fn describe(value: JsValue) -> String {
	if let Some(error) = value.dyn_ref::<js_sys::Error>() {
		String::from(error.message())
	} else if let Some(value) = value.as_string() {
		value
	} else {
		format!("{:?}", value)
	}
}
