//! Resources needed to read the account information

/// The account the access token belongs to
#[derive(Debug, serde::Deserialize)]
pub struct UserInfo {
    #[serde(rename = "uid")]
    pub user_id: u64,
    pub nickname: String,
    /// Used space, in bytes
    #[serde(rename = "spaceUse")]
    pub space_used: u64,
    /// Total space, in bytes
    #[serde(rename = "spaceCapacity", default)]
    pub space_capacity: u64,
}

impl UserInfo {
    pub fn space_available(&self) -> u64 {
        self.space_capacity.saturating_sub(self.space_used)
    }
}

impl crate::Client {
    /// Gets the information of the current user.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::Error`] if the token is invalid or if the request fails.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// let info = client.get_user_info().await?;
    /// println!("{} bytes left", info.space_available());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_user_info(&self) -> crate::Result<UserInfo> {
        self.get_request("/api/v1/user/info", ()).await
    }
}
