//! The whole upload pipeline, from a local file, a reader or a buffer.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::create::{CreateUploadParams, CreatedUpload, UploadSession};
use super::digest;
use super::slice::SlicePlan;
use super::UploadOptions;
use crate::error::UploadError;
use crate::Error;

impl crate::Client {
    /// Uploads a local file into `parent_file_id` and returns the id of the new file.
    ///
    /// The file is read twice: once to compute its digest, once to send its content,
    /// unless the server already knows it.
    ///
    /// # Errors
    ///
    /// Returns a validation error, before any request, when the file doesn't exist, is
    /// empty or too large, or when its name is not a valid filename.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// use pan123::upload::{Duplicate, UploadOptions};
    ///
    /// let options = UploadOptions::default()
    ///     .with_duplicate(Duplicate::KeepBoth)
    ///     .with_progress(|sent, total| println!("{sent}/{total}"));
    /// let file_id = client.upload_file("./report.pdf", 0, options).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        parent_file_id: u64,
        mut options: UploadOptions<'_>,
    ) -> crate::Result<u64> {
        let path = path.as_ref();
        let metadata = match tokio::fs::metadata(path).await {
            Ok(value) => value,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::validation(format!(
                    "file not found: {}",
                    path.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };
        if !metadata.is_file() {
            return Err(Error::validation(format!(
                "not a file: {}",
                path.display()
            )));
        }
        let size = metadata.len();
        crate::validate::upload_size(size)?;

        let filename: Cow<'_, str> = match options.filename.take() {
            Some(value) => value,
            None => path
                .file_name()
                .map(|name| Cow::Owned(name.to_string_lossy().into_owned()))
                .ok_or_else(|| Error::validation("unable to guess the filename"))?,
        };
        if !options.contain_dir {
            crate::validate::filename(&filename)?;
        }

        let etag = digest::file_md5(path).await?;
        tracing::debug!("computed digest {etag} for {}", path.display());
        let file = tokio::fs::File::open(path).await?;
        self.upload_reader(file, &filename, size, &etag, parent_file_id, options)
            .await
    }

    /// Uploads `size` bytes from `reader`, whose MD5 digest is `etag`.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError::SizeMismatch`] when the reader doesn't provide exactly
    /// `size` bytes. The upload is not completed in that case.
    #[tracing::instrument(skip(self, reader, options))]
    pub async fn upload_reader<R>(
        &self,
        mut reader: R,
        filename: &str,
        size: u64,
        etag: &str,
        parent_file_id: u64,
        mut options: UploadOptions<'_>,
    ) -> crate::Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let mut params = CreateUploadParams::new(parent_file_id, filename, etag, size)
            .with_contain_dir(options.contain_dir);
        params.duplicate = options.duplicate;
        let session = match self.create_upload(&params).await? {
            CreatedUpload::Rapid { file_id } => return Ok(file_id),
            CreatedUpload::Session(session) => session,
        };
        self.send_slices(&session, &mut reader, &mut options).await?;
        self.wait_upload_complete(&session.preupload_id, &options.completion)
            .await
    }

    /// Uploads an in-memory content.
    pub async fn upload_bytes(
        &self,
        data: impl AsRef<[u8]>,
        filename: &str,
        parent_file_id: u64,
        options: UploadOptions<'_>,
    ) -> crate::Result<u64> {
        let data = data.as_ref();
        let etag = digest::md5_hex(data);
        self.upload_reader(
            data,
            filename,
            data.len() as u64,
            &etag,
            parent_file_id,
            options,
        )
        .await
    }

    async fn send_slices<R>(
        &self,
        session: &UploadSession,
        reader: &mut R,
        options: &mut UploadOptions<'_>,
    ) -> crate::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let server = session.server(&self.base_url);
        let total = session.total_size;
        let mut sent = 0u64;
        for slice in SlicePlan::new(total, session.slice_size)? {
            let expected = slice.len();
            let mut buffer = Vec::with_capacity(expected as usize);
            (&mut *reader).take(expected).read_to_end(&mut buffer).await?;
            if (buffer.len() as u64) < expected {
                return Err(UploadError::SizeMismatch {
                    declared: total,
                    read: sent + buffer.len() as u64,
                }
                .into());
            }
            self.upload_slice(server, &session.preupload_id, slice.number, buffer)
                .await?;
            sent += expected;
            tracing::debug!("sent slice {} ({sent}/{total} bytes)", slice.number);
            options.report(sent, total);
        }
        let remaining = tokio::io::copy(reader, &mut tokio::io::sink()).await?;
        if remaining > 0 {
            return Err(UploadError::SizeMismatch {
                declared: total,
                read: total + remaining,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockito::Matcher;

    use crate::upload::{CompletionPolicy, UploadOptions};

    fn session_body(server: &mockito::Server, slice_size: u64) -> String {
        format!(
            r#"{{"code": 0, "message": "ok", "data": {{"reuse": false, "preuploadID": "pre-1", "sliceSize": {slice_size}, "servers": ["{}"]}}}}"#,
            server.url()
        )
    }

    #[tokio::test]
    async fn should_send_every_slice_and_report_progress() {
        let content = b"abcdefghijklmnopqrstuvwxy";
        let mut server = mockito::Server::new_async().await;
        let m_create = server
            .mock("POST", "/upload/v2/file/create")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "parentFileID": 12,
                "filename": "letters.txt",
                "etag": crate::upload::digest::md5_hex(content),
                "size": 25,
            })))
            .with_status(200)
            .with_body(session_body(&server, 10))
            .create_async()
            .await;
        let m_slices = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok"}"#)
            .expect(3)
            .create_async()
            .await;
        let m_complete = server
            .mock("POST", "/upload/v2/file/upload_complete")
            .match_body(Matcher::Json(serde_json::json!({ "preuploadID": "pre-1" })))
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": {"completed": true, "fileID": 77}}"#)
            .create_async()
            .await;

        let client = crate::tests::client(&server);
        let mut progress = Vec::new();
        let options =
            UploadOptions::default().with_progress(|sent, total| progress.push((sent, total)));
        let file_id = client
            .upload_bytes(content, "letters.txt", 12, options)
            .await
            .unwrap();
        assert_eq!(file_id, 77);
        assert_eq!(progress, vec![(10, 25), (20, 25), (25, 25)]);
        m_create.assert_async().await;
        m_slices.assert_async().await;
        m_complete.assert_async().await;
    }

    /// Splits a multipart body into its named parts.
    fn multipart_parts(body: &[u8]) -> Vec<(String, Vec<u8>)> {
        fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
            haystack[from..]
                .windows(needle.len())
                .position(|window| window == needle)
                .map(|index| index + from)
        }

        let line_end = find(body, b"\r\n", 0).unwrap();
        let delimiter = [b"\r\n", &body[..line_end]].concat();
        let mut parts = Vec::new();
        let mut cursor = line_end + 2;
        while let Some(next) = find(body, &delimiter, cursor) {
            let part = &body[cursor..next];
            let headers_end = find(part, b"\r\n\r\n", 0).unwrap();
            let headers = String::from_utf8_lossy(&part[..headers_end]);
            let name = headers
                .split("name=\"")
                .nth(1)
                .and_then(|rest| rest.split('"').next())
                .unwrap()
                .to_string();
            parts.push((name, part[headers_end + 4..].to_vec()));
            cursor = next + delimiter.len() + 2;
        }
        parts
    }

    #[tokio::test]
    async fn should_send_slices_that_rebuild_the_content() {
        use rand::RngCore;
        use std::sync::{Arc, Mutex};

        let mut content = vec![0u8; 2500];
        rand::thread_rng().fill_bytes(&mut content);

        let mut server = mockito::Server::new_async().await;
        let _m_create = server
            .mock("POST", "/upload/v2/file/create")
            .with_status(200)
            .with_body(session_body(&server, 1000))
            .create_async()
            .await;
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let m_slices = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body_from_request(move |req| {
                let parts = multipart_parts(req.body().unwrap());
                sink.lock().unwrap().push(parts);
                br#"{"code": 0, "message": "ok"}"#.to_vec()
            })
            .expect(3)
            .create_async()
            .await;
        let _m_complete = server
            .mock("POST", "/upload/v2/file/upload_complete")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": {"completed": true, "fileID": 9}}"#)
            .create_async()
            .await;

        let client = crate::tests::client(&server);
        let file_id = client
            .upload_bytes(&content, "random.bin", 0, UploadOptions::default())
            .await
            .unwrap();
        assert_eq!(file_id, 9);
        m_slices.assert_async().await;

        let received = received.lock().unwrap();
        let mut rebuilt = Vec::new();
        for (index, parts) in received.iter().enumerate() {
            let field = |name: &str| {
                parts
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.clone())
                    .unwrap()
            };
            let data = field("slice");
            assert_eq!(field("preuploadID"), b"pre-1");
            assert_eq!(field("sliceNo"), (index + 1).to_string().into_bytes());
            assert_eq!(
                field("sliceMD5"),
                crate::upload::digest::md5_hex(&data).into_bytes()
            );
            rebuilt.extend_from_slice(&data);
        }
        assert_eq!(
            received.iter().map(|parts| parts.len()).collect::<Vec<_>>(),
            vec![4, 4, 4]
        );
        assert_eq!(rebuilt.len(), content.len());
        assert!(rebuilt == content);
    }

    #[tokio::test]
    async fn should_skip_slices_on_rapid_upload() {
        let mut server = mockito::Server::new_async().await;
        let m_create = server
            .mock("POST", "/upload/v2/file/create")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": {"reuse": true, "fileID": 5}}"#)
            .create_async()
            .await;
        let m_slices = server
            .mock("POST", "/upload/v2/file/slice")
            .expect(0)
            .create_async()
            .await;
        let m_complete = server
            .mock("POST", "/upload/v2/file/upload_complete")
            .expect(0)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let file_id = client
            .upload_bytes(b"known content", "known.txt", 0, UploadOptions::default())
            .await
            .unwrap();
        assert_eq!(file_id, 5);
        m_create.assert_async().await;
        m_slices.assert_async().await;
        m_complete.assert_async().await;
    }

    #[tokio::test]
    async fn should_use_api_when_no_server_is_given() {
        let mut server = mockito::Server::new_async().await;
        let _m_create = server
            .mock("POST", "/upload/v2/file/create")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": {"reuse": false, "preuploadID": "pre-1", "sliceSize": 1024, "servers": []}}"#)
            .create_async()
            .await;
        let m_slice = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok"}"#)
            .expect(1)
            .create_async()
            .await;
        let _m_complete = server
            .mock("POST", "/upload/v2/file/upload_complete")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": {"completed": true, "fileID": 8}}"#)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let file_id = client
            .upload_bytes(b"tiny", "tiny.txt", 0, UploadOptions::default())
            .await
            .unwrap();
        assert_eq!(file_id, 8);
        m_slice.assert_async().await;
    }

    #[tokio::test]
    async fn should_stop_when_reader_is_too_short() {
        let mut server = mockito::Server::new_async().await;
        let _m_create = server
            .mock("POST", "/upload/v2/file/create")
            .with_status(200)
            .with_body(session_body(&server, 10))
            .create_async()
            .await;
        let _m_slices = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok"}"#)
            .create_async()
            .await;
        let m_complete = server
            .mock("POST", "/upload/v2/file/upload_complete")
            .expect(0)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let content: &[u8] = b"only fifteen b.";
        let err = client
            .upload_reader(content, "short.txt", 30, "abc", 0, UploadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_upload(),
            Some(crate::UploadError::SizeMismatch {
                declared: 30,
                read: 15
            })
        ));
        m_complete.assert_async().await;
    }

    #[tokio::test]
    async fn should_stop_when_reader_is_too_long() {
        let mut server = mockito::Server::new_async().await;
        let _m_create = server
            .mock("POST", "/upload/v2/file/create")
            .with_status(200)
            .with_body(session_body(&server, 10))
            .create_async()
            .await;
        let _m_slices = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok"}"#)
            .create_async()
            .await;
        let m_complete = server
            .mock("POST", "/upload/v2/file/upload_complete")
            .expect(0)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let content: &[u8] = b"0123456789abc";
        let err = client
            .upload_reader(content, "long.txt", 10, "abc", 0, UploadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_upload(),
            Some(crate::UploadError::SizeMismatch {
                declared: 10,
                read: 13
            })
        ));
        m_complete.assert_async().await;
    }

    #[tokio::test]
    async fn should_fail_on_rejected_slice() {
        let mut server = mockito::Server::new_async().await;
        let _m_create = server
            .mock("POST", "/upload/v2/file/create")
            .with_status(200)
            .with_body(session_body(&server, 10))
            .create_async()
            .await;
        let m_slices = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body(r#"{"code": 1, "message": "slice md5 mismatch"}"#)
            .expect(1)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let err = client
            .upload_bytes(b"0123456789abcdef", "a.txt", 0, UploadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_upload(),
            Some(crate::UploadError::SliceRejected { slice_no: 1, .. })
        ));
        m_slices.assert_async().await;
    }

    #[tokio::test]
    async fn should_retry_completion_with_policy() {
        let mut server = mockito::Server::new_async().await;
        let _m_create = server
            .mock("POST", "/upload/v2/file/create")
            .with_status(200)
            .with_body(session_body(&server, 10))
            .create_async()
            .await;
        let _m_slices = server
            .mock("POST", "/upload/v2/file/slice")
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok"}"#)
            .create_async()
            .await;
        let m_complete = server
            .mock("POST", "/upload/v2/file/upload_complete")
            .with_status(200)
            .with_body(r#"{"code": 20103, "message": "文件校验中"}"#)
            .expect(3)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let options = UploadOptions::default()
            .with_completion(CompletionPolicy::new(3, Duration::from_millis(1)));
        let err = client
            .upload_bytes(b"content", "a.txt", 0, options)
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_upload(),
            Some(crate::UploadError::CompletionTimeout { attempts: 3 })
        ));
        m_complete.assert_async().await;
    }

    #[tokio::test]
    async fn should_validate_file_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let m_create = server
            .mock("POST", "/upload/v2/file/create")
            .expect(0)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let dir = tempfile::tempdir().unwrap();

        let err = client
            .upload_file(dir.path().join("missing.txt"), 0, UploadOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = client
            .upload_file(dir.path(), 0, UploadOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, b"").unwrap();
        let err = client
            .upload_file(&empty, 0, UploadOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let valid = dir.path().join("valid.txt");
        std::fs::write(&valid, b"content").unwrap();
        let options = UploadOptions::default().with_filename("in|valid.txt");
        let err = client.upload_file(&valid, 0, options).await.unwrap_err();
        assert!(err.is_validation());

        m_create.assert_async().await;
    }

    #[tokio::test]
    async fn should_use_local_filename_by_default() {
        let mut server = mockito::Server::new_async().await;
        let m_create = server
            .mock("POST", "/upload/v2/file/create")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "filename": "notes.md",
                "etag": "9a0364b9e99bb480dd25e1f0284c8555",
                "size": 7,
            })))
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": {"reuse": true, "fileID": 3}}"#)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, b"content").unwrap();
        let file_id = client
            .upload_file(&path, 0, UploadOptions::default())
            .await
            .unwrap();
        assert_eq!(file_id, 3);
        m_create.assert_async().await;
    }
}
