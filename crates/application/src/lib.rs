//! Stitch Application - Admin API client and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The admin API client built on those ports
//! - Application-level error handling

pub mod error;
pub mod error_response;
pub mod ports;
pub mod routes;
pub mod stitch_client;

pub use error::{ClientError, ClientResult, ErrorKind};
pub use error_response::ErrorResponse;
pub use ports::{HttpClient, HttpClientError, HttpResponse, RequestOptions, ResponseBody};
pub use stitch_client::{BasicStitchClient, ExportedApp, StitchClient};
