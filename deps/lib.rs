pub use backtrace;
pub use chrono;
pub use env_logger;
pub use futures;
pub use http;
pub use hyper;
pub use log;
pub use reqwest;
pub use serde_json;
pub use tokio;
pub use url;
