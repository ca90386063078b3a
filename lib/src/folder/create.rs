//! Resources needed to create a folder

use std::borrow::Cow;

#[derive(serde::Serialize)]
struct CreateFolderParams<'a> {
    #[serde(rename = "parentID")]
    parent_id: u64,
    name: Cow<'a, str>,
}

#[derive(serde::Deserialize)]
struct CreateFolderResponse {
    #[serde(rename = "dirID")]
    dir_id: u64,
}

impl crate::Client {
    /// Creates a folder in `parent_id` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without calling the API, when the name is not a valid
    /// filename.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// let folder_id = client.create_folder(0, "holidays").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_folder<'a>(
        &self,
        parent_id: u64,
        name: impl Into<Cow<'a, str>>,
    ) -> crate::Result<u64> {
        let name = name.into();
        crate::validate::filename(&name)?;
        self.post_request::<CreateFolderResponse, _>(
            "/upload/v1/file/mkdir",
            CreateFolderParams { parent_id, name },
        )
        .await
        .map(|res| res.dir_id)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    #[tokio::test]
    async fn success() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/upload/v1/file/mkdir")
            .match_header("authorization", "Bearer access-token")
            .match_body(Matcher::Json(serde_json::json!({
                "parentID": 0,
                "name": "testing",
            })))
            .with_status(200)
            .with_body(r#"{"code": 0, "message": "ok", "data": {"dirID": 12345}}"#)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        assert_eq!(client.create_folder(0, "testing").await.unwrap(), 12345);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn error() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/upload/v1/file/mkdir")
            .with_status(200)
            .with_body(r#"{"code": 1, "message": "folder already exists"}"#)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        let err = client.create_folder(0, "testing").await.unwrap_err();
        assert_eq!(err.as_api().unwrap().message(), "folder already exists");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn should_reject_blank_name() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/upload/v1/file/mkdir")
            .expect(0)
            .create_async()
            .await;
        let client = crate::tests::client(&server);
        assert!(client.create_folder(0, "   ").await.unwrap_err().is_validation());
        m.assert_async().await;
    }
}
