//! HTTP Response domain types

mod status;

pub use status::StatusCode;
