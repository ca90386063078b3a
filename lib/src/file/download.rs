//! Resources needed to download the content of a file

use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(serde::Serialize)]
struct DownloadInfoParams {
    #[serde(rename = "fileID")]
    file_id: u64,
}

#[derive(serde::Deserialize)]
struct DownloadInfo {
    #[serde(rename = "DownloadURL", default)]
    download_url: String,
}

impl crate::Client {
    /// Gets a temporary url to download a file.
    pub async fn get_download_url(&self, file_id: u64) -> crate::Result<String> {
        let info: DownloadInfo = self
            .get_request("/api/v1/file/download_info", DownloadInfoParams { file_id })
            .await?;
        if info.download_url.is_empty() {
            return Err(crate::Error::validation(format!(
                "no download url available for file {file_id}"
            )));
        }
        Ok(info.download_url)
    }

    /// Downloads a file into `writer` and returns the number of bytes written.
    ///
    /// The download url points to a storage server, so no token is sent along.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// let mut output = tokio::fs::File::create("copy.bin").await?;
    /// let written = client.download_file(12345, &mut output).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, writer))]
    pub async fn download_file<W>(&self, file_id: u64, mut writer: W) -> crate::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let url = self.get_download_url(file_id).await?;
        let mut res = self.inner.get(&url).send().await?.error_for_status()?;
        let mut size = 0u64;
        while let Some(chunk) = res.chunk().await? {
            writer.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        writer.flush().await?;
        tracing::debug!("downloaded {size} bytes");
        Ok(size)
    }
}
