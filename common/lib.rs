//! This crate contains everything the prediction page needs that does not depend on a browser: the prediction record, the labels the page is rendered with, the view the renderer writes through, and the render pipeline itself.

mod error;
mod labels;
mod record;
mod render;
mod time;
mod view;

pub use self::error::*;
pub use self::labels::*;
pub use self::record::*;
pub use self::render::*;
pub use self::time::*;
pub use self::view::*;

/// The path of the prediction record, relative to the page that renders it.
pub const PREDICTION_PATH: &str = "prediction.json";
