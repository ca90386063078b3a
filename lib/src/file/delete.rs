//! Resources needed to move files to the trash

use crate::request::Empty;

#[derive(serde::Serialize)]
struct TrashFilesParams<'a> {
    #[serde(rename = "fileIDs")]
    file_ids: &'a [u64],
}

impl crate::Client {
    /// Moves up to 100 files or folders to the trash.
    ///
    /// They can be brought back with [`restore_file`](crate::Client::restore_file) until the
    /// trash is emptied.
    pub async fn trash_files(&self, file_ids: &[u64]) -> crate::Result<()> {
        crate::validate::batch_size(file_ids.len(), "delete")?;
        self.post_request::<Empty, _>("/api/v1/file/trash", TrashFilesParams { file_ids })
            .await
            .map(|_| ())
    }
}
