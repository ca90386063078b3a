//! The authenticated session owned by a [`Client`](crate::Client).
//!
//! The session holds the application credentials, the access token currently in use
//! and the optional [`TokenStore`] it is persisted to. The token is obtained through
//! [`Client::access_token`](crate::Client::access_token), which falls back to the store
//! then to a token request when it is missing or expired, and it is dropped as soon as
//! the API answers with a 401.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, FixedOffset, Utc};

use crate::storage::TokenStore;

/// An access token and its expiration date
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct AccessToken {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "expiredAt")]
    expired_at: DateTime<FixedOffset>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expired_at: impl Into<DateTime<FixedOffset>>) -> Self {
        Self {
            access_token: value.into(),
            expired_at: expired_at.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.access_token
    }

    pub fn expired_at(&self) -> DateTime<FixedOffset> {
        self.expired_at
    }

    /// Whether the token can still be used at the current time.
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && Utc::now() < self.expired_at
    }
}

#[derive(Debug)]
pub struct Session {
    credentials: Option<crate::Credentials>,
    token: RwLock<Option<AccessToken>>,
    // serializes the refresh so concurrent callers only request one token
    refresh: tokio::sync::Mutex<()>,
    store: Option<TokenStore>,
}

impl Session {
    pub(crate) fn new(
        credentials: Option<crate::Credentials>,
        token: Option<AccessToken>,
        store: Option<TokenStore>,
    ) -> Self {
        Self {
            credentials,
            token: RwLock::new(token),
            refresh: tokio::sync::Mutex::new(()),
            store,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn token_store(&self) -> Option<&TokenStore> {
        self.store.as_ref()
    }

    /// Returns the token currently held, valid or not.
    pub fn cached_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn valid_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|token| token.is_valid())
            .map(|token| token.access_token.clone())
    }

    fn set(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    async fn replace(&self, token: AccessToken) {
        if let Some(ref store) = self.store {
            if let Err(err) = store.save(&token).await {
                tracing::warn!("unable to persist access token: {err}");
            }
        }
        self.set(token);
    }

    /// Reads a still valid token from the token store, if any.
    async fn stored_token(&self) -> Option<AccessToken> {
        let store = self.store.as_ref()?;
        match store.load().await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!("unable to read token store: {err}");
                None
            }
        }
    }

    /// Forgets the current token, in memory and in the token store.
    pub async fn invalidate(&self) {
        tracing::debug!("invalidating access token");
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(ref store) = self.store {
            if let Err(err) = store.clear().await {
                tracing::warn!("unable to clear token store: {err}");
            }
        }
    }
}

impl crate::Client {
    /// Returns a valid bearer token, requesting a new one when needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`](crate::Error::MissingCredentials) when the token
    /// has to be refreshed but no credentials were configured, or the error of the
    /// token request.
    pub async fn access_token(&self) -> crate::Result<String> {
        if let Some(token) = self.session.valid_token() {
            return Ok(token);
        }
        let _guard = self.session.refresh.lock().await;
        // another task may have refreshed while we were waiting
        if let Some(token) = self.session.valid_token() {
            return Ok(token);
        }
        if let Some(token) = self.session.stored_token().await {
            tracing::debug!("using access token from the token store");
            let value = token.access_token.clone();
            self.session.set(token);
            return Ok(value);
        }
        let credentials = self
            .session
            .credentials
            .as_ref()
            .ok_or(crate::Error::MissingCredentials)?;
        tracing::debug!("requesting a new access token");
        let token = self
            .get_access_token(credentials.client_id(), credentials.client_secret())
            .await?;
        let value = token.access_token.clone();
        self.session.replace(token).await;
        Ok(value)
    }
}
