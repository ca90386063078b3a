//! Resources needed to send one slice of a file

use reqwest::multipart::{Form, Part};

use crate::error::UploadError;
use crate::request::Empty;
use crate::Error;

impl crate::Client {
    /// Sends the slice `slice_no` of an upload session to `server`.
    ///
    /// Slices are numbered from 1 and must be sent in order. Nothing is retried: the
    /// upload has to be restarted when a slice fails.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError::SliceRejected`] when the server refuses the slice.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload_slice(
        &self,
        server: &str,
        preupload_id: &str,
        slice_no: u32,
        data: Vec<u8>,
    ) -> crate::Result<()> {
        let digest = super::digest::md5_hex(&data);
        let part = Part::bytes(data)
            .file_name(format!("slice_{slice_no}"))
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .text("preuploadID", preupload_id.to_string())
            .text("sliceNo", slice_no.to_string())
            .text("sliceMD5", digest)
            .part("slice", part);
        let url = format!("{}/upload/v2/file/slice", server.trim_end_matches('/'));
        match self.post_request_multipart::<Empty>(&url, form).await {
            Ok(_) => Ok(()),
            Err(Error::Api(err)) => Err(UploadError::SliceRejected {
                slice_no,
                code: err.code(),
                message: err.message().to_string(),
            }
            .into()),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    #[tokio::test]
    async fn success() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/upload/v2/file/slice")
            .match_header("authorization", "Bearer access-token")
            .match_header("platform", "open_platform")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="preuploadID"\r\n\r\npre-123\r\n"#.into()),
                Matcher::Regex(r#"name="sliceNo"\r\n\r\n3\r\n"#.into()),
                Matcher::Regex(
                    r#"name="sliceMD5"\r\n\r\n5eb63bbbe01eeed093cb22bb8f5acdc3\r\n"#.into(),
                ),
                Matcher::Regex(r#"name="slice"; filename="slice_3""#.into()),
                Matcher::Regex("hello world".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": null}"#)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        client
            .upload_slice(&server.url(), "pre-123", 3, b"hello world".to_vec())
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn should_report_rejected_slice() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body(r#"{"code": 1, "message": "md5 mismatch"}"#)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let err = client
            .upload_slice(&server.url(), "pre-123", 2, b"data".to_vec())
            .await
            .unwrap_err();
        match err.as_upload() {
            Some(crate::UploadError::SliceRejected {
                slice_no,
                code,
                message,
            }) => {
                assert_eq!(*slice_no, 2);
                assert_eq!(*code, 1);
                assert_eq!(message, "md5 mismatch");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
