//! Asynchronous client for the 123Pan open platform API.
//!
//! Every capability of the API is exposed as a method on [`Client`], grouped by module:
//! [`file`], [`folder`], [`upload`], [`trash`], [`share`], [`offline`], [`image`],
//! [`video`] and [`direct_link`].
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = pan123::ClientBuilder::from_env().build()?;
//! let user = client.get_user_info().await?;
//! println!("{} uses {} bytes", user.nickname, user.space_used);
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::sync::Arc;

pub use reqwest;

pub mod auth;
pub mod builder;
pub mod credentials;
pub mod direct_link;
pub mod error;
pub mod file;
pub mod folder;
pub mod image;
pub mod offline;
mod request;
pub mod session;
pub mod share;
pub mod storage;
pub mod task;
pub mod trash;
pub mod upload;
pub mod user;
pub mod validate;
pub mod video;

pub use builder::ClientBuilder;
pub use credentials::Credentials;
pub use error::{ApiError, ApiErrorKind, Error, UploadError};
pub use session::AccessToken;
pub use storage::TokenStore;

/// The default user agent for the http client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The production endpoint of the open platform
pub const BASE_URL: &str = "https://open-api.123pan.com";

/// Value of the `Platform` header expected by the open platform
pub const PLATFORM: &str = "open_platform";

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the 123Pan REST API
///
/// Cloning a client is cheap: clones share the same connection pool and the same
/// [`Session`](session::Session), so a token refreshed by one of them is visible to all.
#[derive(Clone)]
pub struct Client {
    base_url: Cow<'static, str>,
    session: Arc<session::Session>,
    inner: reqwest::Client,
}

impl Client {
    /// Creates a client with the default configuration, targeting `base_url`.
    ///
    /// Use [`ClientBuilder`] to set a timeout, a pre-issued token or a token store.
    pub fn new(
        base_url: impl Into<Cow<'static, str>>,
        credentials: Credentials,
    ) -> std::result::Result<Self, builder::Error> {
        ClientBuilder::default()
            .with_base_url(base_url)
            .with_credentials(credentials)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &session::Session {
        &self.session
    }
}
