use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use stitch_application::StitchClient;
use stitch_domain::App;

#[derive(Args)]
pub struct ArchiveArgs {
    /// Client app id, e.g. `my-app-abcde`.
    #[arg(long)]
    app_id: String,
    /// Archive to push.
    #[arg(long)]
    path: PathBuf,
    /// Merge strategy understood by the service.
    #[arg(long, default_value = "merge")]
    strategy: String,
}

impl ArchiveArgs {
    async fn load(&self, client: &impl StitchClient) -> anyhow::Result<(App, Vec<u8>)> {
        let data = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let app = client.fetch_app_by_client_app_id(&self.app_id).await?;
        Ok((app, data))
    }
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    archive: ArchiveArgs,
}

impl ImportArgs {
    pub async fn run(&self, client: &impl StitchClient) -> anyhow::Result<()> {
        let (app, data) = self.archive.load(client).await?;
        client
            .import(&app.group_id, &app.id, &data, &self.archive.strategy)
            .await?;
        println!("imported {} into {}", self.archive.path.display(), app.name);
        Ok(())
    }
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    archive: ArchiveArgs,
}

impl DiffArgs {
    pub async fn run(&self, client: &impl StitchClient) -> anyhow::Result<()> {
        let (app, data) = self.archive.load(client).await?;
        let changes = client
            .diff(&app.group_id, &app.id, &data, &self.archive.strategy)
            .await?;
        for change in changes {
            println!("{change}");
        }
        Ok(())
    }
}
