//! Admin API route templates.

use serde::Serialize;

/// Prefix shared by every admin route.
pub const ADMIN_BASE_URL: &str = "/api/admin/v3.0";

/// Profile of the authenticated user.
pub const USER_PROFILE: &str = "/api/admin/v3.0/auth/profile";

#[derive(Serialize)]
struct ImportQuery<'a> {
    strategy: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<bool>,
}

/// Login route for an authentication provider.
#[must_use]
pub fn auth_provider_login(provider_type: &str) -> String {
    format!("{ADMIN_BASE_URL}/auth/providers/{provider_type}/login")
}

/// Export route for an app.
#[must_use]
pub fn app_export(group_id: &str, app_id: &str) -> String {
    format!("{ADMIN_BASE_URL}/groups/{group_id}/apps/{app_id}/export")
}

/// Import route for an app; `diff` turns the import into a dry run.
///
/// # Errors
///
/// Returns an error if the query string cannot be encoded.
pub fn app_import(
    group_id: &str,
    app_id: &str,
    strategy: &str,
    diff: bool,
) -> Result<String, serde_urlencoded::ser::Error> {
    let query = serde_urlencoded::to_string(ImportQuery {
        strategy,
        diff: diff.then_some(true),
    })?;
    Ok(format!(
        "{ADMIN_BASE_URL}/groups/{group_id}/apps/{app_id}/import?{query}"
    ))
}

/// Lists the apps of a group.
#[must_use]
pub fn apps_by_group_id(group_id: &str) -> String {
    format!("{ADMIN_BASE_URL}/groups/{group_id}/apps")
}
