#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Name of the folder to create
    name: String,
    /// Id of the parent folder
    #[clap(long, default_value_t = pan123::file::ROOT_FOLDER_ID)]
    parent: u64,
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        let folder_id = client.create_folder(self.parent, &self.name).await?;
        tracing::info!("created folder {:?} in {}", self.name, self.parent);
        println!("{folder_id}");
        Ok(())
    }
}
