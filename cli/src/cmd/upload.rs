use std::io::Write;
use std::path::PathBuf;

use pan123::upload::{Duplicate, UploadOptions};

use super::size_formatter;

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Id of the folder to upload to
    #[clap(long, default_value_t = pan123::file::ROOT_FOLDER_ID)]
    parent: u64,

    /// Name of the remote file, defaults to the local file name
    #[clap(long)]
    name: Option<String>,

    /// Replace a remote file with the same name instead of keeping both
    #[clap(long, default_value = "false")]
    overwrite: bool,

    /// Don't display the progress
    #[clap(short, long, default_value = "false")]
    quiet: bool,

    /// Local file to upload
    path: PathBuf,
}

impl Command {
    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        let mut options = UploadOptions::default();
        if let Some(ref name) = self.name {
            options.set_filename(name.as_str());
        }
        if self.overwrite {
            options.set_duplicate(Duplicate::Overwrite);
        }
        if !self.quiet {
            let fmt = size_formatter();
            options.set_progress(move |sent, total| {
                let percent = sent * 100 / total.max(1);
                let sent = fmt.format(sent as f64);
                let total = fmt.format(total as f64);
                eprint!("\r{sent} / {total} ({percent}%)");
                let _ = std::io::stderr().flush();
            });
        }
        tracing::info!("uploading {:?} to folder {}", self.path, self.parent);
        let file_id = client.upload_file(&self.path, self.parent, options).await?;
        if !self.quiet {
            eprintln!();
        }
        println!("{file_id}");
        Ok(())
    }
}
