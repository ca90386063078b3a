//! Resources needed to close an upload session

use super::CompletionPolicy;
use crate::error::UploadError;
use crate::Error;

#[derive(serde::Serialize)]
struct CompleteUploadParams<'a> {
    #[serde(rename = "preuploadID")]
    preupload_id: &'a str,
}

/// State of an upload once all its slices were sent
#[derive(Clone, Debug, serde::Deserialize)]
pub struct UploadCompletion {
    pub completed: bool,
    #[serde(rename = "fileID", default)]
    pub file_id: u64,
}

impl UploadCompletion {
    fn file_id(&self) -> Option<u64> {
        (self.completed && self.file_id != 0).then_some(self.file_id)
    }
}

impl crate::Client {
    /// Asks the server to assemble the slices of an upload, once.
    pub async fn complete_upload(&self, preupload_id: &str) -> crate::Result<UploadCompletion> {
        self.post_request(
            "/upload/v2/file/upload_complete",
            CompleteUploadParams { preupload_id },
        )
        .await
    }

    /// Completes an upload, asking again while the server is still verifying the content.
    ///
    /// The server is called at most `policy.max_attempts` times, waiting `policy.delay`
    /// between two calls.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError::CompletionTimeout`] when the upload is still not complete
    /// after the last attempt. Errors other than the verification in progress are returned
    /// right away.
    #[tracing::instrument(skip(self))]
    pub async fn wait_upload_complete(
        &self,
        preupload_id: &str,
        policy: &CompletionPolicy,
    ) -> crate::Result<u64> {
        let max_attempts = policy.attempts();
        for attempt in 1..=max_attempts {
            match self.complete_upload(preupload_id).await {
                Ok(res) => {
                    if let Some(file_id) = res.file_id() {
                        return Ok(file_id);
                    }
                    tracing::debug!("upload not completed yet, attempt {attempt}");
                }
                Err(Error::Api(err)) if err.is_verification_in_progress() => {
                    tracing::debug!("upload still being verified, attempt {attempt}");
                }
                Err(err) => return Err(err),
            }
            if attempt < max_attempts {
                tokio::time::sleep(policy.delay).await;
            }
        }
        tracing::warn!("upload {preupload_id} not completed after {max_attempts} attempts");
        Err(UploadError::CompletionTimeout {
            attempts: max_attempts,
        }
        .into())
    }
}
