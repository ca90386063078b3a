use futures_util::TryStreamExt;

#[derive(clap::Subcommand)]
pub(crate) enum Command {
    /// List the content of the trash
    List,
    /// Put trashed files back where they were
    Restore {
        #[clap(required = true)]
        file_ids: Vec<u64>,
    },
    /// Delete trashed files for good
    Purge {
        #[clap(required = true)]
        file_ids: Vec<u64>,
    },
    /// Delete everything in the trash for good
    Empty,
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let limit = pan123::validate::MAX_PAGE_LIMIT;
                let mut stream = Box::pin(client.list_all_trash(limit));
                while let Some(entry) = stream.try_next().await? {
                    println!("{}\t{}\t{}", entry.file_id, entry.filename, entry.size);
                }
            }
            Self::Restore { file_ids } => {
                for file_id in file_ids {
                    client.restore_file(file_id).await?;
                }
            }
            Self::Purge { file_ids } => {
                for file_id in file_ids {
                    client.delete_permanently(file_id).await?;
                }
            }
            Self::Empty => client.empty_trash().await?,
        }
        Ok(())
    }
}
