//! Resources needed to copy a file

#[derive(serde::Serialize)]
struct CopyFileParams {
    #[serde(rename = "fileID")]
    file_id: u64,
    #[serde(rename = "targetParentID")]
    target_parent_id: u64,
}

#[derive(serde::Deserialize)]
struct CopyFileResponse {
    #[serde(rename = "fileID", default)]
    file_id: u64,
}

impl crate::Client {
    /// Copies a file or a folder into `target_parent_id` and returns the id of the copy.
    pub async fn copy_file(&self, file_id: u64, target_parent_id: u64) -> crate::Result<u64> {
        let params = CopyFileParams {
            file_id,
            target_parent_id,
        };
        self.post_request::<CopyFileResponse, _>("/api/v1/file/copy", params)
            .await
            .map(|res| res.file_id)
    }
}
