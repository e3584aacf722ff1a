use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use stitch_application::{BasicStitchClient, StitchClient};
use stitch_domain::ApiKeyProvider;
use stitch_infrastructure::{ClientSettings, ReqwestHttpClient};
use tracing::debug;

/// Options shared by every command.
#[derive(Args)]
pub struct CommonArgs {
    /// TOML file with client settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Cloud username.
    #[arg(long, env = "STITCH_USERNAME", global = true)]
    username: Option<String>,
    /// Cloud API key.
    #[arg(long, env = "STITCH_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,
}

impl CommonArgs {
    /// Loads settings, logs in and returns a client carrying the session.
    pub async fn connect(&self) -> anyhow::Result<BasicStitchClient<ReqwestHttpClient>> {
        let settings =
            ClientSettings::load(self.config.as_deref()).context("failed to load settings")?;
        debug!(base_url = %settings.base_url, "loaded settings");

        let username = self
            .username
            .as_deref()
            .context("missing --username (or STITCH_USERNAME)")?;
        let api_key = self
            .api_key
            .as_deref()
            .context("missing --api-key (or STITCH_API_KEY)")?;

        let transport = ReqwestHttpClient::new(&settings)?;
        let auth = BasicStitchClient::new(Arc::new(transport.clone()))
            .authenticate(&ApiKeyProvider::new(username, api_key))
            .await?;
        debug!(user_id = %auth.user_id, "authenticated");

        Ok(BasicStitchClient::new(Arc::new(
            transport.with_access_token(auth.access_token),
        )))
    }
}
