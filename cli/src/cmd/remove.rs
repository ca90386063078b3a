#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Ids of the files and folders to move to the trash
    #[clap(required = true)]
    file_ids: Vec<u64>,
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        for chunk in self.file_ids.chunks(pan123::validate::MAX_BATCH_SIZE) {
            client.trash_files(chunk).await?;
        }
        tracing::info!("moved {} entries to the trash", self.file_ids.len());
        Ok(())
    }
}
