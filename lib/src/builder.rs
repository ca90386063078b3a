use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::session::{AccessToken, Session};
use crate::storage::TokenStore;

/// Default timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that may occur during client configuration and building.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the underlying HTTP client could not be built.
    #[error("unable to build reqwest client")]
    Reqwest(#[from] reqwest::Error),
}

fn timeout_from_env() -> Option<Duration> {
    let value = std::env::var("PAN123_TIMEOUT").ok()?;
    match value.parse::<f64>() {
        Ok(secs) if secs > 0.0 => Some(Duration::from_secs_f64(secs)),
        _ => {
            tracing::warn!("ignoring invalid PAN123_TIMEOUT value {value:?}");
            None
        }
    }
}

fn flag_from_env(name: &str) -> bool {
    std::env::var(name)
        .map(|value| {
            matches!(
                value.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

/// Builder for constructing a [`Client`](crate::Client) with custom configuration.
///
/// This allows specifying the base URL, credentials, a pre-issued access token,
/// a token store and optionally customizing the inner `reqwest::ClientBuilder`.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Cow<'static, str>,
    client_builder: Option<reqwest::ClientBuilder>,
    credentials: Option<crate::Credentials>,
    access_token: Option<AccessToken>,
    token_store: Option<TokenStore>,
    timeout: Duration,
}

impl Default for ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings:
    ///
    /// - Base URL is set to the production endpoint.
    /// - No credentials, access token or token store are set.
    /// - The timeout is 30 seconds.
    fn default() -> Self {
        Self {
            base_url: Cow::Borrowed(crate::BASE_URL),
            client_builder: None,
            credentials: None,
            access_token: None,
            token_store: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientBuilder {
    /// Creates a builder pre-configured using environment variables.
    ///
    /// - Uses `PAN123_BASE_URL` for the endpoint.
    /// - Uses `PAN123_CLIENT_ID` and `PAN123_CLIENT_SECRET` for credentials.
    /// - Uses `PAN123_TIMEOUT`, in seconds, for the request timeout.
    /// - Enables the token store in `./.env` when `PAN123_ENABLE_TOKEN_STORAGE` is set to a truthy value.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PAN123_BASE_URL")
            .ok()
            .filter(|value| !value.is_empty())
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed(crate::BASE_URL));
        let token_store = flag_from_env("PAN123_ENABLE_TOKEN_STORAGE").then(TokenStore::default);

        Self {
            base_url,
            client_builder: None,
            credentials: crate::Credentials::from_env(),
            access_token: None,
            token_store,
            timeout: timeout_from_env().unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientBuilder {
    /// Sets a custom base URL.
    pub fn set_base_url(&mut self, base_url: impl Into<Cow<'static, str>>) {
        self.base_url = base_url.into();
    }

    /// Sets a custom base URL and returns the modified builder.
    pub fn with_base_url(mut self, base_url: impl Into<Cow<'static, str>>) -> Self {
        self.set_base_url(base_url);
        self
    }

    /// Sets a custom `reqwest::ClientBuilder`.
    pub fn set_client_builder(&mut self, client_builder: reqwest::ClientBuilder) {
        self.client_builder = Some(client_builder);
    }

    /// Sets a custom `reqwest::ClientBuilder` and returns the modified builder.
    pub fn with_client_builder(mut self, client_builder: reqwest::ClientBuilder) -> Self {
        self.set_client_builder(client_builder);
        self
    }

    /// Sets the credentials used to request access tokens.
    pub fn set_credentials(&mut self, credentials: crate::Credentials) {
        self.credentials = Some(credentials);
    }

    /// Sets the credentials and returns the modified builder.
    pub fn with_credentials(mut self, credentials: crate::Credentials) -> Self {
        self.set_credentials(credentials);
        self
    }

    /// Sets an already issued access token.
    ///
    /// It takes precedence over a token found in the token store.
    pub fn set_access_token(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    /// Sets an already issued access token and returns the modified builder.
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.set_access_token(token);
        self
    }

    /// Persists the access tokens in the given dotenv file.
    pub fn set_token_store(&mut self, path: impl Into<PathBuf>) {
        self.token_store = Some(TokenStore::new(path));
    }

    /// Persists the access tokens in the given dotenv file and returns the modified builder.
    pub fn with_token_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.set_token_store(path);
        self
    }

    /// Sets the timeout applied to every request.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Sets the timeout and returns the modified builder.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    /// Builds the [`Client`](crate::Client) with the configured options.
    ///
    /// The token store, if any, is only read when the first token is needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reqwest`] if the HTTP client could not be built.
    pub fn build(self) -> Result<crate::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert("Platform", HeaderValue::from_static(crate::PLATFORM));
        let builder = self
            .client_builder
            .unwrap_or_default()
            .user_agent(crate::USER_AGENT)
            .default_headers(headers)
            .timeout(self.timeout);

        Ok(crate::Client {
            base_url: self.base_url,
            session: Arc::new(Session::new(
                self.credentials,
                self.access_token,
                self.token_store,
            )),
            inner: builder.build()?,
        })
    }
}
