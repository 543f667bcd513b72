use reqwest::Client;

use crate::{
    config::SpotifyConfig,
    spotify::{SpotifyError, check_status},
    types::{SearchResponse, SpotifyTrack},
};

pub const SEARCH_LIMIT: u32 = 6;
pub const SEARCH_MARKET: &str = "IN";

/// Keyword track search restricted to the Indian market.
///
/// Returns at most [`SEARCH_LIMIT`] tracks. Errors are classified exactly like
/// [`super::recommendations::get_recommendations`].
pub async fn search_tracks(
    client: &Client,
    config: &SpotifyConfig,
    token: &str,
    query: &str,
) -> Result<Vec<SpotifyTrack>, SpotifyError> {
    let limit = SEARCH_LIMIT.to_string();
    let response = client
        .get(config.endpoint("search"))
        .bearer_auth(token)
        .query(&[
            ("q", query),
            ("type", "track"),
            ("limit", limit.as_str()),
            ("market", SEARCH_MARKET),
        ])
        .send()
        .await
        .map_err(SpotifyError::Unreachable)?;

    let response = check_status(response).await?;
    let res = response
        .json::<SearchResponse>()
        .await
        .map_err(SpotifyError::Decode)?;

    Ok(res.tracks.items)
}
