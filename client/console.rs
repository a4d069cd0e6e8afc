use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Sends log records to the browser's console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

pub fn init() {
	if log::set_logger(&LOGGER).is_ok() {
		log::set_max_level(LevelFilter::Info);
	}
}

impl Log for ConsoleLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= Level::Info
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		let message = JsValue::from_str(&record.args().to_string());
		match record.level() {
			Level::Error => console::error_1(&message),
			Level::Warn => console::warn_1(&message),
			_ => console::log_1(&message),
		}
	}

	fn flush(&self) {}
}
