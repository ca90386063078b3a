use futures_util::TryStreamExt;
use pan123::file::list::{ListFilesParams, SearchMode};
use pan123::file::FileInfo;


#[derive(Default)]
struct ColumnWidths {
    id: usize,
    kind: usize,
    name: usize,
    size: usize,
}

impl ColumnWidths {
    fn from_iter<'a>(iter: impl Iterator<Item = &'a EntryLine<'a>>) -> Self {
        iter.fold(Self::default(), |mut res, item| {
            res.id = res.id.max(item.id.len());
            res.kind = res.kind.max(item.kind.len());
            res.name = res.name.max(item.name.len());
            res.size = res.size.max(item.size.len());
            res
        })
    }
}

struct EntryLine<'a> {
    id: String,
    kind: &'a str,
    name: &'a str,
    size: String,
}

struct ListFormatter {
    size_fmt: Option<human_number::Formatter<'static>>,
}

impl ListFormatter {
    fn convert_lines<'a>(&self, entries: &'a [FileInfo]) -> Vec<EntryLine<'a>> {
        entries
            .iter()
            .map(|entry| EntryLine {
                id: entry.file_id.to_string(),
                kind: if entry.is_folder() { "directory" } else { "file" },
                name: entry.filename.as_str(),
                size: match self.size_fmt {
                    _ if entry.is_folder() => "-".to_string(),
                    Some(ref fmt) => fmt.format(entry.size as f64).to_string(),
                    None => entry.size.to_string(),
                },
            })
            .collect()
    }

    fn write(&self, entries: &[FileInfo]) {
        let lines = self.convert_lines(entries);
        let widths = ColumnWidths::from_iter(lines.iter());
        for line in lines {
            println!(
                "{:>iw$}  {:<kw$}  {:nw$}  {:>sw$}",
                line.id,
                line.kind,
                line.name,
                line.size,
                iw = widths.id,
                kw = widths.kind,
                nw = widths.name,
                sw = widths.size,
            );
        }
    }
}

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Format size to be human readable
    #[clap(long, default_value = "false")]
    human_size: bool,

    /// Only show the entries whose name contains this value
    #[clap(long)]
    search: Option<String>,

    /// Match the search value exactly
    #[clap(long, default_value = "false", requires = "search")]
    exact: bool,

    /// Also list the files that are in the trash
    #[clap(long, default_value = "false")]
    with_trashed: bool,

    /// Id of the folder to list
    #[clap(default_value_t = pan123::file::ROOT_FOLDER_ID)]
    folder_id: u64,
}

impl Command {
    fn params(&self) -> ListFilesParams<'_> {
        let params = ListFilesParams::new(self.folder_id);
        match self.search.as_deref() {
            Some(value) => {
                let mode = if self.exact {
                    SearchMode::Exact
                } else {
                    SearchMode::Fuzzy
                };
                params.with_search(value, mode)
            }
            None => params,
        }
    }

    fn formatter(&self) -> ListFormatter {
        ListFormatter {
            size_fmt: self.human_size.then(super::size_formatter),
        }
    }

    pub(crate) async fn execute(self, client: &pan123::Client) -> anyhow::Result<()> {
        let with_trashed = self.with_trashed;
        let entries: Vec<FileInfo> = client
            .list_all_files(self.params())
            .try_filter(|entry| futures_util::future::ready(with_trashed || !entry.trashed))
            .try_collect()
            .await?;
        self.formatter().write(&entries);
        Ok(())
    }
}
