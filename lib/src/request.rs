//! The dispatcher shared by every endpoint: url building, authentication and envelope decoding.

use reqwest::StatusCode;

use crate::error::ApiError;
use crate::Error;

/// Payload type of the endpoints returning nothing useful
pub(crate) type Empty = serde::de::IgnoredAny;

/// The envelope wrapping every response of the API
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    #[serde(default = "Envelope::unknown_code")]
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(rename = "x-traceID", default)]
    trace_id: Option<String>,
}

impl Envelope {
    fn unknown_code() -> i64 {
        -1
    }

    fn payload<T: serde::de::DeserializeOwned>(self) -> Result<T, Error> {
        if self.code != 0 {
            let message = self.message.unwrap_or_else(|| "Unknown error".into());
            return Err(ApiError::new(self.code, message, self.trace_id).into());
        }
        serde_json::from_value(self.data).map_err(Error::from)
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, Error> {
    let envelope = serde_json::from_slice::<Envelope>(body);
    if status.is_client_error() || status.is_server_error() {
        let (message, trace_id) = match envelope {
            Ok(Envelope {
                message: Some(message),
                trace_id,
                ..
            }) if !message.is_empty() => (message, trace_id),
            Ok(Envelope { trace_id, .. }) => (fallback_message(status, body), trace_id),
            Err(_) => (fallback_message(status, body), None),
        };
        return Err(ApiError::new(i64::from(status.as_u16()), message, trace_id).into());
    }
    envelope?.payload()
}

fn fallback_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        text.into_owned()
    }
}

pub(crate) async fn read_response<T: serde::de::DeserializeOwned>(
    res: reqwest::Response,
) -> Result<T, Error> {
    let status = res.status();
    tracing::debug!("responded with status {status:?}");
    let body = res.bytes().await?;
    decode(status, &body)
}

/// Accepts both booleans and the `0`/`1` integers the API uses for some flags
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    use serde::Deserialize;
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

impl crate::Client {
    pub(crate) fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Sends a request with the bearer token and drops the token when the API rejects it.
    pub(crate) async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let token = self.access_token().await?;
        let res = builder.bearer_auth(token).send().await?;
        match read_response(res).await {
            Err(Error::Api(err)) if err.code() == 401 => {
                self.session.invalidate().await;
                Err(Error::Api(err))
            }
            other => other,
        }
    }

    #[tracing::instrument(name = "get", skip(self, params))]
    pub(crate) async fn get_request<T: serde::de::DeserializeOwned, P: serde::Serialize>(
        &self,
        path: &str,
        params: P,
    ) -> Result<T, Error> {
        let uri = self.build_url(path);
        self.execute(self.inner.get(uri).query(&params)).await
    }

    #[tracing::instrument(name = "post", skip(self, body))]
    pub(crate) async fn post_request<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: B,
    ) -> Result<T, Error> {
        let uri = self.build_url(path);
        self.execute(self.inner.post(uri).json(&body)).await
    }

    #[tracing::instrument(name = "put", skip(self, body))]
    pub(crate) async fn put_request<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: B,
    ) -> Result<T, Error> {
        let uri = self.build_url(path);
        self.execute(self.inner.put(uri).json(&body)).await
    }

    /// Posts a multipart form to an absolute url, which may be another host than the API.
    #[tracing::instrument(name = "post_multipart", skip(self, form))]
    pub(crate) async fn post_request_multipart<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        self.execute(self.inner.post(url).multipart(form)).await
    }
}
