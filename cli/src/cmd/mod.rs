mod download;
mod list;
mod mkdir;
mod moving;
mod offline;
mod remove;
mod rename;
mod share;
mod trash;
mod upload;
mod whoami;

#[derive(clap::Subcommand)]
pub(crate) enum Command {
    /// Show the account the credentials belong to
    Whoami(whoami::Command),
    /// List the content of a folder
    #[clap(alias = "ls")]
    List(list::Command),
    /// Create a folder
    Mkdir(mkdir::Command),
    /// Upload a local file
    Upload(upload::Command),
    /// Download a file
    Download(download::Command),
    /// Move files to the trash
    #[clap(alias = "rm")]
    Remove(remove::Command),
    /// Move files to another folder
    #[clap(alias = "mv")]
    Move(moving::Command),
    /// Rename a file or a folder
    Rename(rename::Command),
    /// Manage the trash
    #[clap(subcommand)]
    Trash(trash::Command),
    /// Manage share links
    #[clap(subcommand)]
    Share(share::Command),
    /// Manage offline downloads
    #[clap(subcommand)]
    Offline(offline::Command),
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        match self {
            Self::Whoami(inner) => inner.execute(client).await,
            Self::List(inner) => inner.execute(client).await,
            Self::Mkdir(inner) => inner.execute(client).await,
            Self::Upload(inner) => inner.execute(client).await,
            Self::Download(inner) => inner.execute(client).await,
            Self::Remove(inner) => inner.execute(client).await,
            Self::Move(inner) => inner.execute(client).await,
            Self::Rename(inner) => inner.execute(client).await,
            Self::Trash(inner) => inner.execute(client).await,
            Self::Share(inner) => inner.execute(client).await,
            Self::Offline(inner) => inner.execute(client).await,
        }
    }
}

/// Formats sizes in bytes with binary prefixes.
pub(crate) fn size_formatter() -> human_number::Formatter<'static> {
    human_number::Formatter::binary()
        .with_decimals(1)
        .with_unit("B")
}
