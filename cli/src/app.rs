use std::path::PathBuf;

use clap::Parser;
use pan123::Client;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(about, author, version)]
pub struct Command {
    /// Path to load the configuration file. Default to ~/.config/pan123.json. If not found, loading from environment.
    #[clap(short, long)]
    config: Option<PathBuf>,
    #[clap(short, long)]
    verbose: bool,
    #[clap(subcommand)]
    subcmd: crate::cmd::Command,
}

impl Command {
    pub fn config(&self) -> PathBuf {
        if let Some(ref cfg) = self.config {
            cfg.clone()
        } else if let Some(cfg_dir) = dirs::config_dir() {
            cfg_dir.join("pan123.json")
        } else {
            PathBuf::from(".pan123.json")
        }
    }

    pub async fn execute(self, client: &Client) -> anyhow::Result<()> {
        self.subcmd.execute(client).await
    }

    pub fn set_log_level(&self) {
        let filter = if self.verbose {
            EnvFilter::new("pan123=debug,pan123_cli=debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            eprintln!("couldn't init logger: {err}");
        }
    }
}
