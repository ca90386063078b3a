//! Resources needed to obtain an access token

use crate::request::read_response;
use crate::session::AccessToken;

#[derive(serde::Serialize)]
struct AccessTokenParams<'a> {
    #[serde(rename = "clientID")]
    client_id: &'a str,
    #[serde(rename = "clientSecret")]
    client_secret: &'a str,
}

impl crate::Client {
    /// Requests a new access token for the given application credentials.
    ///
    /// This call is not authenticated and does not touch the session: use
    /// [`Client::access_token`](crate::Client::access_token) to get a token that is cached
    /// and refreshed automatically.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::Error`] if the credentials are rejected or if the request fails.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: &pan123::Client) -> Result<(), pan123::Error> {
    /// let token = client.get_access_token("client-id", "client-secret").await?;
    /// println!("valid until {}", token.expired_at());
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, client_secret))]
    pub async fn get_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> crate::Result<AccessToken> {
        let uri = self.build_url("/api/v1/access_token");
        let res = self
            .inner
            .post(uri)
            .json(&AccessTokenParams {
                client_id,
                client_secret,
            })
            .send()
            .await?;
        read_response(res).await
    }
}
