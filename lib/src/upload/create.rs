//! Resources needed to open an upload session

use std::borrow::Cow;

use super::Duplicate;
use crate::error::UploadError;

/// Parameters used to create an upload session
#[derive(Clone, Debug, serde::Serialize)]
pub struct CreateUploadParams<'a> {
    #[serde(rename = "parentFileID")]
    pub parent_file_id: u64,
    pub filename: Cow<'a, str>,
    /// MD5 digest of the whole file
    pub etag: Cow<'a, str>,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<Duplicate>,
    #[serde(rename = "containDir", skip_serializing_if = "std::ops::Not::not")]
    pub contain_dir: bool,
}

impl<'a> CreateUploadParams<'a> {
    pub fn new(
        parent_file_id: u64,
        filename: impl Into<Cow<'a, str>>,
        etag: impl Into<Cow<'a, str>>,
        size: u64,
    ) -> Self {
        Self {
            parent_file_id,
            filename: filename.into(),
            etag: etag.into(),
            size,
            duplicate: None,
            contain_dir: false,
        }
    }

    pub fn set_duplicate(&mut self, value: Duplicate) {
        self.duplicate = Some(value);
    }

    pub fn with_duplicate(mut self, value: Duplicate) -> Self {
        self.set_duplicate(value);
        self
    }

    pub fn set_contain_dir(&mut self, value: bool) {
        self.contain_dir = value;
    }

    pub fn with_contain_dir(mut self, value: bool) -> Self {
        self.set_contain_dir(value);
        self
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if !self.contain_dir {
            crate::validate::filename(&self.filename)?;
        }
        crate::validate::upload_size(self.size)
    }
}

#[derive(Debug, serde::Deserialize)]
struct CreateUploadResponse {
    reuse: bool,
    #[serde(rename = "fileID", default)]
    file_id: Option<u64>,
    #[serde(rename = "preuploadID", default)]
    preupload_id: Option<String>,
    #[serde(rename = "sliceSize", default)]
    slice_size: Option<u64>,
    #[serde(default)]
    servers: Vec<String>,
}

/// An open upload session, waiting for the slices of the file
#[derive(Clone, Debug)]
pub struct UploadSession {
    pub parent_file_id: u64,
    pub filename: String,
    pub total_size: u64,
    pub etag: String,
    pub preupload_id: String,
    pub slice_size: u64,
    /// Servers accepting the slices, the API itself is used when empty
    pub servers: Vec<String>,
}

impl UploadSession {
    /// The server the slices are sent to
    pub fn server<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.servers
            .iter()
            .map(|server| server.trim_end_matches('/'))
            .find(|server| !server.is_empty())
            .unwrap_or(fallback)
    }
}

/// The answer of the server to a session creation
#[derive(Clone, Debug)]
pub enum CreatedUpload {
    /// The content was already known, the file exists with this id
    Rapid { file_id: u64 },
    Session(UploadSession),
}

impl CreatedUpload {
    pub fn is_rapid_upload(&self) -> bool {
        matches!(self, Self::Rapid { .. })
    }
}

#[derive(Debug, serde::Deserialize)]
struct UploadDomainResponse {
    #[serde(default)]
    servers: Vec<String>,
}

impl crate::Client {
    /// Creates an upload session.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, when the filename is invalid
    /// or when the size is 0 or above 10GiB, and an [`UploadError::InvalidSession`] when the
    /// server doesn't provide what is needed to send the slices.
    pub async fn create_upload(
        &self,
        params: &CreateUploadParams<'_>,
    ) -> crate::Result<CreatedUpload> {
        params.validate()?;
        let res: CreateUploadResponse =
            self.post_request("/upload/v2/file/create", params).await?;
        if res.reuse {
            let file_id = res.file_id.unwrap_or_default();
            tracing::debug!("rapid upload of {:?} as file {file_id}", params.filename);
            return Ok(CreatedUpload::Rapid { file_id });
        }
        let preupload_id = res
            .preupload_id
            .filter(|id| !id.is_empty())
            .ok_or(UploadError::InvalidSession("missing preupload id"))?;
        let slice_size = res
            .slice_size
            .filter(|size| *size > 0)
            .ok_or(UploadError::InvalidSession("missing slice size"))?;
        Ok(CreatedUpload::Session(UploadSession {
            parent_file_id: params.parent_file_id,
            filename: params.filename.to_string(),
            total_size: params.size,
            etag: params.etag.to_string(),
            preupload_id,
            slice_size,
            servers: res.servers,
        }))
    }

    /// Lists the servers accepting slices.
    pub async fn get_upload_domain(&self) -> crate::Result<Vec<String>> {
        self.get_request::<UploadDomainResponse, _>("/upload/v2/file/upload_domain", ())
            .await
            .map(|res| res.servers)
    }
}
