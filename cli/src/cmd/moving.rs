#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Id of the destination folder
    #[clap(long)]
    to: u64,

    /// Ids of the files and folders to move
    #[clap(required = true)]
    file_ids: Vec<u64>,
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        for chunk in self.file_ids.chunks(pan123::validate::MAX_BATCH_SIZE) {
            client.move_files(chunk, self.to).await?;
        }
        tracing::info!("moved {} entries to {}", self.file_ids.len(), self.to);
        Ok(())
    }
}
