use super::size_formatter;

#[derive(clap::Parser)]
pub(crate) struct Command {}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        let user = client.get_user_info().await?;
        let fmt = size_formatter();
        println!("{} ({})", user.nickname, user.user_id);
        println!(
            "space: {} used of {}, {} available",
            fmt.format(user.space_used as f64),
            fmt.format(user.space_capacity as f64),
            fmt.format(user.space_available() as f64),
        );
        Ok(())
    }
}
