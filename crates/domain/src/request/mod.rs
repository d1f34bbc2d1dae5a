//! HTTP Request domain types

mod body;
mod header;
mod method;
mod path;
mod spec;

pub use body::RequestBody;
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use path::PathTemplate;
pub use spec::{DEFAULT_TIMEOUT_MS, RequestSpec};
