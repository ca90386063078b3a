use std::path::{Path, PathBuf};
use std::time::Duration;

use pan123::builder::Error as BuilderError;
use pan123::{Client, ClientBuilder, Credentials};
use serde::Deserialize;

/// Content of the json configuration file, every field falling back to the environment.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    client_id: Option<String>,
    client_secret: Option<String>,
    base_url: Option<String>,
    /// Request timeout, in seconds
    timeout: Option<u64>,
    /// Dotenv file where the access token is kept between runs
    token_storage: Option<PathBuf>,
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let reader = std::fs::File::open(path).map_err(|err| err.to_string())?;
        let result = serde_json::from_reader(reader).map_err(|err| err.to_string())?;
        Ok(result)
    }

    fn credentials(&self) -> Option<Credentials> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some(Credentials::new(id, secret))
            }
            _ => None,
        }
    }

    pub fn builder(self) -> ClientBuilder {
        let mut builder = ClientBuilder::from_env();
        if let Some(creds) = self.credentials() {
            builder.set_credentials(creds);
        }
        if let Some(base_url) = self.base_url {
            builder.set_base_url(base_url);
        }
        if let Some(timeout) = self.timeout.map(Duration::from_secs) {
            builder.set_timeout(timeout);
        }
        if let Some(path) = self.token_storage {
            builder.set_token_store(path);
        }
        builder
    }

    pub fn build(self) -> Result<Client, BuilderError> {
        self.builder().build()
    }
}
