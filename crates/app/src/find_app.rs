use anyhow::Context;
use clap::Args;
use stitch_application::StitchClient;

#[derive(Args)]
pub struct FindAppArgs {
    /// Client app id, e.g. `my-app-abcde`.
    #[arg(long)]
    app_id: String,
}

impl FindAppArgs {
    pub async fn run(&self, client: &impl StitchClient) -> anyhow::Result<()> {
        let app = client.fetch_app_by_client_app_id(&self.app_id).await?;
        let json = serde_json::to_string_pretty(&app).context("failed to encode app")?;
        println!("{json}");
        Ok(())
    }
}
