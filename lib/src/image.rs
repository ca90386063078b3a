//! Resources needed to host images and get their direct url

use std::path::Path;

use reqwest::multipart::{Form, Part};

/// A hosted image
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ImageInfo {
    #[serde(rename = "fileID")]
    pub file_id: u64,
    #[serde(rename = "directUrl")]
    pub direct_url: String,
    pub filename: String,
    pub size: u64,
    #[serde(default)]
    pub format: String,
}

#[derive(serde::Serialize)]
struct CopyImageParams {
    #[serde(rename = "fileID")]
    file_id: u64,
}

#[derive(serde::Deserialize)]
struct CopyImageResponse {
    #[serde(rename = "directUrl", default)]
    direct_url: String,
}

fn mime_type(format: &str) -> &'static str {
    match format {
        "png" => "image/png",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}

impl crate::Client {
    /// Uploads a local image, optionally in the folder `dir_id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, when the extension of the file
    /// is not one of png, gif, jpeg, jpg, tiff, tif, webp, svg or bmp.
    pub async fn upload_image(
        &self,
        path: impl AsRef<Path>,
        dir_id: Option<u64>,
    ) -> crate::Result<ImageInfo> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| crate::Error::validation("unable to guess the image name"))?;
        crate::validate::image_format(&filename)?;
        let data = tokio::fs::read(path).await?;
        self.upload_image_bytes(data, &filename, dir_id).await
    }

    /// Uploads an in-memory image named `filename`.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload_image_bytes(
        &self,
        data: Vec<u8>,
        filename: &str,
        dir_id: Option<u64>,
    ) -> crate::Result<ImageInfo> {
        let format = crate::validate::image_format(filename)?;
        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime_type(&format))?;
        let mut form = Form::new()
            .text("fileName", filename.to_string())
            .part("file", part);
        if let Some(dir_id) = dir_id {
            form = form.text("dirID", dir_id.to_string());
        }
        let url = self.build_url("/api/v1/image/upload");
        self.post_request_multipart(&url, form).await
    }

    /// Publishes an image already stored on the drive and returns its direct url.
    pub async fn copy_cloud_image(&self, file_id: u64) -> crate::Result<String> {
        let params = CopyImageParams { file_id };
        self.post_request::<CopyImageResponse, _>("/api/v1/image/copy", params)
            .await
            .map(|res| res.direct_url)
    }
}
