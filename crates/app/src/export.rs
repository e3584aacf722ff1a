use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use stitch_application::StitchClient;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

#[derive(Args)]
pub struct ExportArgs {
    /// Client app id, e.g. `my-app-abcde`.
    #[arg(long)]
    app_id: String,
    /// Directory the archive is written to.
    #[arg(long, short, default_value = ".")]
    output: PathBuf,
}

impl ExportArgs {
    pub async fn run(&self, client: &impl StitchClient) -> anyhow::Result<()> {
        let app = client.fetch_app_by_client_app_id(&self.app_id).await?;
        let mut exported = client.export(&app.group_id, &app.id).await?;

        let target = archive_path(&self.output, &exported.filename)?;
        let mut file = File::create(&target)
            .await
            .with_context(|| format!("failed to create {}", target.display()))?;
        let written = tokio::io::copy(&mut exported.archive, &mut file)
            .await
            .with_context(|| format!("failed to write {}", target.display()))?;
        file.flush().await?;

        println!("{} ({written} bytes)", target.display());
        Ok(())
    }
}

/// Joins the server-supplied filename onto `dir`, refusing names that would
/// escape it.
fn archive_path(dir: &Path, filename: &str) -> anyhow::Result<PathBuf> {
    let name = Path::new(filename);
    match name.file_name() {
        Some(base) if base == name.as_os_str() => Ok(dir.join(base)),
        _ => bail!("refusing to write export to unsafe filename {filename:?}"),
    }
}
