use futures_util::TryStreamExt;
use pan123::share::create::CreateShareParams;

#[derive(clap::Subcommand)]
pub(crate) enum Command {
    /// Create a share link
    Create {
        /// Name of the share
        #[clap(long)]
        name: String,
        /// Validity in days: 0 (forever), 1, 7 or 30
        #[clap(long, default_value_t = 7)]
        expire_days: u32,
        /// Password visitors have to provide
        #[clap(long)]
        password: Option<String>,
        /// Ids of the files to share
        #[clap(required = true)]
        file_ids: Vec<u64>,
    },
    /// List the share links
    List,
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        match self {
            Self::Create {
                name,
                expire_days,
                password,
                file_ids,
            } => {
                let mut params = CreateShareParams::new(name, expire_days, file_ids);
                if let Some(password) = password {
                    params.set_password(password);
                }
                let share = client.create_share(&params).await?;
                println!("{}", share.share_url());
            }
            Self::List => {
                let limit = pan123::validate::MAX_PAGE_LIMIT;
                let mut stream = Box::pin(client.list_all_shares(limit));
                while let Some(share) = stream.try_next().await? {
                    let state = if share.is_expired() { "expired" } else { "active" };
                    println!(
                        "{}\t{}\t{}\t{}",
                        share.share_id,
                        share.share_name,
                        share.share_url(),
                        state
                    );
                }
            }
        }
        Ok(())
    }
}
