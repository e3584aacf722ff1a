//! Stitch Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus client settings loading.

pub mod adapters;
pub mod settings;

pub use adapters::ReqwestHttpClient;
pub use settings::{
    ClientSettings, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ENV_PREFIX, SettingsError,
};
