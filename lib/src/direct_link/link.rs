//! Enabling direct links on a folder and getting the url of a file

use crate::request::Empty;

#[derive(serde::Serialize)]
struct FileParams {
    #[serde(rename = "fileID")]
    file_id: u64,
}

#[derive(serde::Deserialize)]
struct FilenameResponse {
    filename: String,
}

#[derive(serde::Deserialize)]
struct UrlResponse {
    url: String,
}

impl crate::Client {
    /// Enables direct links on a folder and returns the name of the folder.
    pub async fn enable_direct_link(&self, file_id: u64) -> crate::Result<String> {
        let params = FileParams { file_id };
        self.post_request::<FilenameResponse, _>("/api/v1/direct-link/enable", params)
            .await
            .map(|res| res.filename)
    }

    /// Disables direct links on a folder and returns the name of the folder.
    pub async fn disable_direct_link(&self, file_id: u64) -> crate::Result<String> {
        let params = FileParams { file_id };
        self.post_request::<FilenameResponse, _>("/api/v1/direct-link/disable", params)
            .await
            .map(|res| res.filename)
    }

    /// Gets the direct url of a file stored in a folder with direct links enabled.
    pub async fn get_direct_link_url(&self, file_id: u64) -> crate::Result<String> {
        self.get_request::<UrlResponse, _>("/api/v1/direct-link/url", FileParams { file_id })
            .await
            .map(|res| res.url)
    }

    pub async fn refresh_direct_link_cache(&self) -> crate::Result<()> {
        let params = serde_json::json!({});
        self.post_request::<Empty, _>("/api/v1/direct-link/cache/refresh", params)
            .await
            .map(|_| ())
    }
}
