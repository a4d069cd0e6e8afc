pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Create an `Error` from a format string, like `format!`.
#[macro_export]
macro_rules! err {
	($($arg:tt)*) => {
		$crate::error::Error::from(format!($($arg)*))
	};
}

#[test]
fn test_err() {
	let error = err!("no prediction at {}", "docs/prediction.json");
	assert_eq!(error.to_string(), "no prediction at docs/prediction.json");
}
