//! Application metadata as returned by the admin API

use serde::{Deserialize, Serialize};

/// A Stitch application.
///
/// `id` is the internal identifier used in admin routes; `client_app_id`
/// is the public identifier users know the app by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct App {
    /// Internal application id.
    #[serde(rename = "_id", deserialize_with = "crate::nullable::or_default")]
    pub id: String,
    /// Public, client-facing application id.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub client_app_id: String,
    /// Display name.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub name: String,
    /// Owning group id.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub group_id: String,
}

/// Returns the first app whose `client_app_id` equals `client_app_id`.
///
/// Comparison is exact and case-sensitive.
#[must_use]
pub fn find_app_by_client_app_id(apps: Vec<App>, client_app_id: &str) -> Option<App> {
    apps.into_iter().find(|app| app.client_app_id == client_app_id)
}
