//! Resources needed to get the details of a file

use super::FileInfo;

#[derive(serde::Serialize)]
struct FileInfoParams {
    #[serde(rename = "fileID")]
    file_id: u64,
}

impl crate::Client {
    /// Gets the details of a file or a folder.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::Error`] if the file doesn't exist or if the request fails.
    pub async fn get_file_info(&self, file_id: u64) -> crate::Result<FileInfo> {
        self.get_request("/api/v1/file/info", FileInfoParams { file_id })
            .await
    }
}
