use derive_more::Display;

/// The ways loading a prediction record can fail. They all produce the same message on the page, the variants only matter for the log.
#[derive(Debug, Display)]
pub enum LoadError {
	#[display(fmt = "failed to fetch the prediction: {}", _0)]
	Fetch(String),
	#[display(fmt = "unexpected http status {}", _0)]
	Status(u16),
	#[display(fmt = "invalid prediction record: {}", _0)]
	Parse(serde_json::Error),
}

impl std::error::Error for LoadError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			LoadError::Parse(error) => Some(error),
			_ => None,
		}
	}
}

impl From<serde_json::Error> for LoadError {
	fn from(error: serde_json::Error) -> LoadError {
		LoadError::Parse(error)
	}
}

#[test]
fn test_load_error_display() {
	assert_eq!(
		LoadError::Fetch("connection refused".to_owned()).to_string(),
		"failed to fetch the prediction: connection refused"
	);
	assert_eq!(LoadError::Status(404).to_string(), "unexpected http status 404");
	let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
	let error = LoadError::from(error);
	assert!(error.to_string().starts_with("invalid prediction record: "));
	assert!(std::error::Error::source(&error).is_some());
}
