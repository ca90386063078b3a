use std::path::PathBuf;

use tokio::io::BufWriter;

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Don't overwrite an existing local file
    #[clap(long, default_value = "false")]
    skip_existing: bool,

    /// Id of the file to download
    file_id: u64,

    /// Local path to write to, defaults to the remote file name in the current directory
    output: Option<PathBuf>,
}

impl Command {
    async fn target(&self, client: &pan123::Client) -> anyhow::Result<PathBuf> {
        if let Some(ref output) = self.output {
            if !output.is_dir() {
                return Ok(output.clone());
            }
        }
        let info = client.get_file_info(self.file_id).await?;
        if info.is_folder() {
            anyhow::bail!("{:?} is a folder", info.filename);
        }
        let dir = self.output.clone().unwrap_or_else(|| PathBuf::from("."));
        Ok(dir.join(info.filename))
    }

    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        let target = self.target(client).await?;
        if self.skip_existing && target.exists() {
            tracing::info!("{target:?} already exists, skipping...");
            return Ok(());
        }
        tracing::info!("downloading file {} to {target:?}", self.file_id);
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&target)
            .await?;
        let size = client
            .download_file(self.file_id, BufWriter::new(file))
            .await?;
        println!("{} bytes written to {}", size, target.display());
        Ok(())
    }
}
