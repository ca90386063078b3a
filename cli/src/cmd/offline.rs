use pan123::offline::CreateDownloadTaskParams;

#[derive(clap::Subcommand)]
pub(crate) enum Command {
    /// Make the server download a url
    Add {
        /// Id of the folder to download to
        #[clap(long)]
        dir_id: Option<u64>,
        /// Name of the downloaded file
        #[clap(long)]
        name: Option<String>,
        /// Http or https url of the file
        url: String,
    },
    /// Show the progress of a download
    Status { task_id: u64 },
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        match self {
            Self::Add { dir_id, name, url } => {
                let mut params = CreateDownloadTaskParams::new(url);
                if let Some(dir_id) = dir_id {
                    params = params.with_dir_id(dir_id);
                }
                if let Some(name) = name {
                    params = params.with_file_name(name);
                }
                let task_id = client.create_download_task(&params).await?;
                println!("{task_id}");
            }
            Self::Status { task_id } => {
                let task = client.get_download_progress(task_id).await?;
                let result = pan123::task::TaskResult::from(task);
                match result.result_reference {
                    Some(file_id) => println!(
                        "{} {}% (file {file_id})",
                        result.status, result.progress_percent
                    ),
                    None => println!("{} {}%", result.status, result.progress_percent),
                }
            }
        }
        Ok(())
    }
}
