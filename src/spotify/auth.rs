use reqwest::Client;

use crate::{config::SpotifyConfig, spotify::SpotifyError, types::ClientToken};

/// Requests an app access token with the client-credentials grant.
///
/// Sends the client ID and secret as form fields to the configured token
/// endpoint. No user interaction is involved and no refresh token is issued;
/// a new exchange is simply performed once the token expires.
///
/// # Arguments
///
/// * `client` - Shared HTTP client (carries the request timeout)
/// * `config` - Token endpoint URL and credentials
///
/// # Returns
///
/// - `Ok(ClientToken)` - Access token and its lifetime in seconds
/// - `Err(SpotifyError::AuthUnreachable)` - The endpoint could not be reached
/// - `Err(SpotifyError::AuthRejected)` - Non-2xx answer, e.g. bad credentials
/// - `Err(SpotifyError::Decode)` - The body was not a token document
pub async fn request_client_token(
    client: &Client,
    config: &SpotifyConfig,
) -> Result<ClientToken, SpotifyError> {
    let res = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(SpotifyError::AuthUnreachable)?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(SpotifyError::AuthRejected { status, body });
    }

    res.json::<ClientToken>()
        .await
        .map_err(SpotifyError::Decode)
}
