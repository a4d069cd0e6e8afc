use std::{
	cell::RefCell,
	convert::Infallible,
	future::Future,
	panic::AssertUnwindSafe,
	path::{Component, Path, PathBuf},
	sync::Arc,
};
use stockcast_deps::{backtrace::Backtrace, futures::FutureExt, http, hyper, log, tokio};

pub async fn serve<C, H, F>(
	host: std::net::IpAddr,
	port: u16,
	request_handler_context: C,
	request_handler: H,
) -> hyper::Result<()>
where
	C: Send + Sync + 'static,
	H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
	F: Future<Output = http::Response<hyper::Body>> + Send,
{
	// Create a task local that will store the panic message and backtrace if a panic occurs.
	tokio::task_local! {
		static PANIC_MESSAGE_AND_BACKTRACE: RefCell<Option<(String, Backtrace)>>;
	}
	async fn service<C, H, F>(
		request_handler: Arc<H>,
		request_handler_context: Arc<C>,
		request: http::Request<hyper::Body>,
	) -> Result<http::Response<hyper::Body>, Infallible>
	where
		C: Send + Sync + 'static,
		H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
		F: Future<Output = http::Response<hyper::Body>> + Send,
	{
		let method = request.method().clone();
		let path = request.uri().path().to_owned();
		let result = AssertUnwindSafe(request_handler(request_handler_context, request))
			.catch_unwind()
			.await;
		let response = result.unwrap_or_else(|_| {
			let body = PANIC_MESSAGE_AND_BACKTRACE.with(|panic_message_and_backtrace| {
				let panic_message_and_backtrace = panic_message_and_backtrace.borrow();
				match panic_message_and_backtrace.as_ref() {
					Some((message, backtrace)) => format!("{}\n{:?}", message, backtrace),
					None => "internal server error".to_owned(),
				}
			});
			log::error!("{}", body);
			response(http::StatusCode::INTERNAL_SERVER_ERROR, body)
		});
		log::info!("{} {} {}", method, path, response.status().as_u16());
		Ok(response)
	}
	// Install a panic hook that will record the panic message and backtrace if a panic occurs.
	let hook = std::panic::take_hook();
	std::panic::set_hook(Box::new(|panic_info| {
		let value = (panic_info.to_string(), Backtrace::new());
		PANIC_MESSAGE_AND_BACKTRACE.with(|panic_message_and_backtrace| {
			panic_message_and_backtrace.borrow_mut().replace(value);
		})
	}));
	// Wrap the request handler and context with Arc to allow sharing a reference to it with each task.
	let request_handler = Arc::new(request_handler);
	let request_handler_context = Arc::new(request_handler_context);
	let service = hyper::service::make_service_fn(|_| {
		let request_handler = request_handler.clone();
		let request_handler_context = request_handler_context.clone();
		async move {
			Ok::<_, Infallible>(hyper::service::service_fn(move |request| {
				let request_handler = request_handler.clone();
				let request_handler_context = request_handler_context.clone();
				PANIC_MESSAGE_AND_BACKTRACE.scope(RefCell::new(None), async move {
					service(request_handler, request_handler_context, request).await
				})
			}))
		}
	});
	let addr = std::net::SocketAddr::new(host, port);
	let server = hyper::Server::try_bind(&addr)?;
	log::info!("🚀 serving on port {}", port);
	server.serve(service).await?;
	std::panic::set_hook(hook);
	Ok(())
}

/// Serve the files in `dir`. `/` and any path ending in `/` serve that directory's `index.html`.
pub async fn serve_dir(dir: Arc<PathBuf>, request: http::Request<hyper::Body>) -> http::Response<hyper::Body> {
	match *request.method() {
		http::Method::GET | http::Method::HEAD => {}
		_ => return response(http::StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
	}
	let path = match resolve_path(&dir, request.uri().path()) {
		Some(path) => path,
		None => return response(http::StatusCode::BAD_REQUEST, "bad request"),
	};
	let data = match tokio::fs::read(&path).await {
		Ok(data) => data,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
			return response(http::StatusCode::NOT_FOUND, "not found")
		}
		Err(error) => {
			log::error!("failed to read {}: {}", path.display(), error);
			return response(http::StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
		}
	};
	let mut builder = http::Response::builder().status(http::StatusCode::OK);
	if let Some(content_type) = content_type(&path) {
		builder = builder.header(http::header::CONTENT_TYPE, content_type);
	}
	// The prediction changes out from under the page, so never let a browser reuse an old one.
	if path.extension().map(|extension| extension == "json").unwrap_or(false) {
		builder = builder.header(http::header::CACHE_CONTROL, "no-cache");
	}
	let body = if request.method() == http::Method::HEAD {
		hyper::Body::empty()
	} else {
		hyper::Body::from(data)
	};
	builder
		.body(body)
		.unwrap_or_else(|_| response(http::StatusCode::INTERNAL_SERVER_ERROR, "internal server error"))
}

/// Map a request path onto a file in `dir`. Returns `None` for paths that would leave `dir`.
pub fn resolve_path(dir: &Path, request_path: &str) -> Option<PathBuf> {
	let relative_path = request_path.trim_start_matches('/');
	let mut path = dir.to_owned();
	for component in Path::new(relative_path).components() {
		match component {
			Component::Normal(component) => path.push(component),
			Component::CurDir => {}
			_ => return None,
		}
	}
	if relative_path.is_empty() || relative_path.ends_with('/') {
		path.push("index.html");
	}
	Some(path)
}

pub fn content_type(path: &Path) -> Option<&'static str> {
	let extension = path.extension()?.to_str()?;
	match extension {
		"html" => Some("text/html; charset=utf-8"),
		"css" => Some("text/css"),
		"js" => Some("text/javascript"),
		"json" => Some("application/json"),
		"svg" => Some("image/svg+xml"),
		"wasm" => Some("application/wasm"),
		_ => None,
	}
}

fn response(status: http::StatusCode, body: impl Into<hyper::Body>) -> http::Response<hyper::Body> {
	let mut response = http::Response::new(body.into());
	*response.status_mut() = status;
	response
}

#[test]
fn test_resolve_path() {
	let dir = Path::new("docs");
	assert_eq!(resolve_path(dir, "/"), Some(PathBuf::from("docs/index.html")));
	assert_eq!(
		resolve_path(dir, "/prediction.json"),
		Some(PathBuf::from("docs/prediction.json"))
	);
	assert_eq!(
		resolve_path(dir, "/js/stockcast_client_bg.wasm"),
		Some(PathBuf::from("docs/js/stockcast_client_bg.wasm"))
	);
	assert_eq!(resolve_path(dir, "/js/"), Some(PathBuf::from("docs/js/index.html")));
	assert_eq!(
		resolve_path(dir, "/./style.css"),
		Some(PathBuf::from("docs/style.css"))
	);
	assert_eq!(resolve_path(dir, "/../Cargo.toml"), None);
	assert_eq!(resolve_path(dir, "/js/../../Cargo.toml"), None);
}

#[test]
fn test_content_type() {
	assert_eq!(
		content_type(Path::new("docs/index.html")),
		Some("text/html; charset=utf-8")
	);
	assert_eq!(
		content_type(Path::new("docs/prediction.json")),
		Some("application/json")
	);
	assert_eq!(
		content_type(Path::new("docs/js/stockcast_client_bg.wasm")),
		Some("application/wasm")
	);
	assert_eq!(content_type(Path::new("docs/README")), None);
}
