//! Resources needed to rename a file

use std::borrow::Cow;

use crate::request::Empty;

#[derive(serde::Serialize)]
struct RenameFileParams<'a> {
    #[serde(rename = "fileId")]
    file_id: u64,
    #[serde(rename = "fileName")]
    file_name: Cow<'a, str>,
}

impl crate::Client {
    /// Renames a file or a folder.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, when the new name is not a
    /// valid filename.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// client.rename_file(12345678, "new_name.txt").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn rename_file<'a>(
        &self,
        file_id: u64,
        name: impl Into<Cow<'a, str>>,
    ) -> crate::Result<()> {
        let file_name = name.into();
        crate::validate::filename(&file_name)?;
        self.put_request::<Empty, _>(
            "/api/v1/file/name",
            RenameFileParams { file_id, file_name },
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    #[tokio::test]
    async fn success() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("PUT", "/api/v1/file/name")
            .match_body(Matcher::Json(serde_json::json!({
                "fileId": 42,
                "fileName": "yolo.bin",
            })))
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": null}"#)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        client.rename_file(42, "yolo.bin").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn should_reject_invalid_name() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("PUT", "/api/v1/file/name")
            .expect(0)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let err = client.rename_file(42, "bad:name").await.unwrap_err();
        assert!(err.is_validation());
        m.assert_async().await;
    }
}
