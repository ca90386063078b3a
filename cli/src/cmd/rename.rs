#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Id of the file or folder to rename
    file_id: u64,
    /// The new name
    name: String,
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        client.rename_file(self.file_id, self.name).await?;
        Ok(())
    }
}
