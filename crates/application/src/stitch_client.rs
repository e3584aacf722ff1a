//! Stitch admin API client
//!
//! Each operation builds a route, runs it through the [`HttpClient`] port,
//! checks the endpoint's success status and either decodes the body or
//! normalizes it into a [`ClientError`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use stitch_domain::{
    App, AuthResponse, AuthenticationProvider, ContentDisposition, HttpMethod, StatusCode,
    UserProfile, find_app_by_client_app_id,
};
use tokio::io::AsyncReadExt;
use tracing::{debug, instrument};

use crate::error::{ClientError, ClientResult};
use crate::error_response::ErrorResponse;
use crate::ports::{HttpClient, HttpResponse, RequestOptions, ResponseBody};
use crate::routes;

const CONTENT_DISPOSITION: &str = "Content-Disposition";

/// An exported app archive.
///
/// `archive` is the still-open response body. The caller owns it and must
/// read it to the end or drop it; holding it keeps the connection busy.
pub struct ExportedApp {
    /// File name announced by the server.
    pub filename: String,
    /// Archive bytes, streamed from the server.
    pub archive: ResponseBody,
}

impl fmt::Debug for ExportedApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedApp")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// Operations offered by the Stitch admin API.
#[async_trait]
pub trait StitchClient: Send + Sync {
    /// Logs in through `provider` and returns the new session.
    ///
    /// # Errors
    ///
    /// Fails if the payload cannot be serialized, the transport fails,
    /// the login is rejected, or the session cannot be decoded.
    async fn authenticate<P>(&self, provider: &P) -> ClientResult<AuthResponse>
    where
        P: AuthenticationProvider + Sync + ?Sized;

    /// Downloads an app as an archive.
    ///
    /// On success the response body is handed to the caller inside
    /// [`ExportedApp`]; every other path closes it.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-200 statuses, an unparseable
    /// `Content-Disposition` header, or a missing file name.
    async fn export(&self, group_id: &str, app_id: &str) -> ClientResult<ExportedApp>;

    /// Pushes an app archive to the server.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or any status other than 204.
    async fn import(
        &self,
        group_id: &str,
        app_id: &str,
        app_data: &[u8],
        strategy: &str,
    ) -> ClientResult<()>;

    /// Dry-runs an import and returns the proposed changes.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-200 statuses, or an undecodable
    /// change list.
    async fn diff(
        &self,
        group_id: &str,
        app_id: &str,
        app_data: &[u8],
        strategy: &str,
    ) -> ClientResult<Vec<String>>;

    /// Finds an app by its client app id across the user's groups.
    ///
    /// # Errors
    ///
    /// Fails on the first transport, service or decoding error, or with
    /// [`ClientError::AppNotFound`] if no group holds the app.
    async fn fetch_app_by_client_app_id(&self, client_app_id: &str) -> ClientResult<App>;
}

/// [`StitchClient`] backed by an [`HttpClient`].
///
/// Holds no state between calls.
pub struct BasicStitchClient<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> BasicStitchClient<C> {
    /// Creates a new client on top of the given transport.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse> {
        debug!(%method, path, "sending admin API request");
        let response = self.client.execute(method, path, options).await?;
        debug!(%method, path, status = response.status.as_u16(), "admin API responded");
        Ok(response)
    }

    async fn invoke_import_route(
        &self,
        group_id: &str,
        app_id: &str,
        app_data: &[u8],
        strategy: &str,
        diff: bool,
    ) -> ClientResult<HttpResponse> {
        let path = routes::app_import(group_id, app_id, strategy, diff)?;
        self.execute(
            HttpMethod::Post,
            &path,
            RequestOptions::new().body(app_data),
        )
        .await
    }

    async fn fetch_apps_by_group_id(&self, group_id: &str) -> ClientResult<Vec<App>> {
        let response = self
            .execute(
                HttpMethod::Get,
                &routes::apps_by_group_id(group_id),
                RequestOptions::new(),
            )
            .await?;

        match response.status {
            StatusCode::OK => read_json(response.body).await,
            // A group the user cannot see into holds nothing relevant.
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            _ => Err(normalize(response.body).await),
        }
    }
}

impl<C: HttpClient> fmt::Debug for BasicStitchClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicStitchClient").finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: HttpClient> StitchClient for BasicStitchClient<C> {
    #[instrument(skip_all, fields(provider = provider.provider_type()))]
    async fn authenticate<P>(&self, provider: &P) -> ClientResult<AuthResponse>
    where
        P: AuthenticationProvider + Sync + ?Sized,
    {
        let body = serde_json::to_vec(&provider.payload()).map_err(ClientError::Serialization)?;

        let response = self
            .execute(
                HttpMethod::Post,
                &routes::auth_provider_login(provider.provider_type()),
                RequestOptions::new()
                    .body(body)
                    .header("Content-Type", mime::APPLICATION_JSON.as_ref()),
            )
            .await?;

        if response.status != StatusCode::OK {
            let source = ErrorResponse::from_reader(response.body)
                .await
                .map_err(ClientError::BodyRead)?;
            return Err(ClientError::Authentication {
                status: response.status,
                source,
            });
        }

        read_json(response.body).await
    }

    #[instrument(skip(self))]
    async fn export(&self, group_id: &str, app_id: &str) -> ClientResult<ExportedApp> {
        let response = self
            .execute(
                HttpMethod::Get,
                &routes::app_export(group_id, app_id),
                RequestOptions::new(),
            )
            .await?;

        if response.status != StatusCode::OK {
            return Err(normalize(response.body).await);
        }

        let header = response
            .headers
            .get(CONTENT_DISPOSITION)
            .unwrap_or_default();
        let disposition = ContentDisposition::parse(header)?;
        let filename = disposition
            .filename()
            .ok_or(ClientError::ExportMissingFilename)?
            .to_string();
        debug!(
            disposition = disposition.disposition(),
            filename = %filename,
            "export archive ready"
        );

        Ok(ExportedApp {
            filename,
            archive: response.body,
        })
    }

    #[instrument(skip(self, app_data), fields(bytes = app_data.len()))]
    async fn import(
        &self,
        group_id: &str,
        app_id: &str,
        app_data: &[u8],
        strategy: &str,
    ) -> ClientResult<()> {
        let response = self
            .invoke_import_route(group_id, app_id, app_data, strategy, false)
            .await?;

        if response.status != StatusCode::NO_CONTENT {
            return Err(normalize(response.body).await);
        }

        Ok(())
    }

    #[instrument(skip(self, app_data), fields(bytes = app_data.len()))]
    async fn diff(
        &self,
        group_id: &str,
        app_id: &str,
        app_data: &[u8],
        strategy: &str,
    ) -> ClientResult<Vec<String>> {
        let response = self
            .invoke_import_route(group_id, app_id, app_data, strategy, true)
            .await?;

        if response.status != StatusCode::OK {
            return Err(normalize(response.body).await);
        }

        read_json(response.body).await
    }

    #[instrument(skip(self))]
    async fn fetch_app_by_client_app_id(&self, client_app_id: &str) -> ClientResult<App> {
        let response = self
            .execute(HttpMethod::Get, routes::USER_PROFILE, RequestOptions::new())
            .await?;

        if response.status != StatusCode::OK {
            return Err(normalize(response.body).await);
        }

        let profile: UserProfile = read_json(response.body).await?;

        for group_id in profile.all_group_ids() {
            let apps = self.fetch_apps_by_group_id(&group_id).await?;
            if let Some(app) = find_app_by_client_app_id(apps, client_app_id) {
                debug!(group_id = %group_id, app_id = %app.id, "resolved client app id");
                return Ok(app);
            }
        }

        Err(ClientError::AppNotFound(client_app_id.to_string()))
    }
}

/// Reads a success body and decodes it as JSON.
async fn read_json<T: DeserializeOwned>(mut body: ResponseBody) -> ClientResult<T> {
    let mut buffer = Vec::new();
    body.read_to_end(&mut buffer)
        .await
        .map_err(ClientError::BodyRead)?;
    serde_json::from_slice(&buffer).map_err(ClientError::Protocol)
}

/// Turns a failure body into the error returned to the caller.
async fn normalize(body: ResponseBody) -> ClientError {
    match ErrorResponse::from_reader(body).await {
        Ok(source) => ClientError::Service(source),
        Err(err) => ClientError::BodyRead(err),
    }
}
