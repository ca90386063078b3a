//! The application credentials used to obtain access tokens from the developer platform.

/// The client id and secret issued by the developer platform
#[derive(Clone, serde::Serialize)]
pub struct Credentials {
    #[serde(rename = "clientID")]
    client_id: String,
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"********")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials based on the environment variables
    ///
    /// When both `PAN123_CLIENT_ID` and `PAN123_CLIENT_SECRET` are set and not empty,
    /// `Some(Credentials)` is returned, otherwise `None`.
    ///
    /// ```rust
    /// use pan123::Credentials;
    ///
    /// match Credentials::from_env() {
    ///     Some(creds) => println!("using client {}", creds.client_id()),
    ///     None => eprintln!("no credentials provided"),
    /// }
    /// ```
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("PAN123_CLIENT_ID").ok()?;
        let client_secret = std::env::var("PAN123_CLIENT_SECRET").ok()?;
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            client_secret,
        })
    }

    pub fn new<I: Into<String>, S: Into<String>>(client_id: I, client_secret: S) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

#[cfg(test)]
mod tests {
    use super::Credentials;

    #[test]
    fn should_hide_secret_when_debugging() {
        let creds = Credentials::new("my-id", "my-secret");
        let output = format!("{creds:?}");
        assert!(output.contains("my-id"));
        assert!(!output.contains("my-secret"));
    }

    #[test]
    fn should_serialize_with_api_names() {
        let creds = Credentials::new("my-id", "my-secret");
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            serde_json::json!({"clientID": "my-id", "clientSecret": "my-secret"})
        );
    }
}
