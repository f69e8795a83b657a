//! Request extractors that reject malformed input with the JSON error body.

mod json;
mod path_id;

pub use json::{ApiJson, ApiQuery};
pub use path_id::CustomerIdPath;
