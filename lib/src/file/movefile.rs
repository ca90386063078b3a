//! Resources needed to move files to another folder

use crate::request::Empty;

#[derive(serde::Serialize)]
struct MoveFilesParams<'a> {
    #[serde(rename = "fileIDs")]
    file_ids: &'a [u64],
    #[serde(rename = "toParentFileID")]
    to_parent_file_id: u64,
}

impl crate::Client {
    /// Moves up to 100 files or folders into `to_parent_file_id`.
    pub async fn move_files(&self, file_ids: &[u64], to_parent_file_id: u64) -> crate::Result<()> {
        crate::validate::batch_size(file_ids.len(), "move")?;
        let params = MoveFilesParams {
            file_ids,
            to_parent_file_id,
        };
        self.post_request::<Empty, _>("/api/v1/file/move", params)
            .await
            .map(|_| ())
    }
}
