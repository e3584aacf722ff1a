//! HTTP Request domain types

mod header;
mod method;

pub use header::{Header, Headers};
pub use method::HttpMethod;
