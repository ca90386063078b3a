mod app;
mod cmd;
mod config;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cmd = app::Command::parse();
    cmd.set_log_level();

    let config_path = cmd.config();
    let config = match config::Config::from_path(&config_path) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!("unable to load config from {config_path:?}: {err}");
            config::Config::default()
        }
    };
    let client = match config.build() {
        Ok(value) => value,
        Err(err) => {
            eprintln!("unable to build client: {err}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    if let Err(err) = cmd.execute(&client).await {
        eprintln!("error: {err:#}");
        std::process::exit(exitcode::SOFTWARE);
    }
}
