use reqwest::Client;

use crate::{
    config::SpotifyConfig,
    emotion::EmotionProfile,
    spotify::{SpotifyError, check_status},
    types::{RecommendationsResponse, SpotifyTrack},
};

/// Popularity floor applied to every recommendation request.
pub const MIN_POPULARITY: u32 = 30;

/// Query parameters for `GET /recommendations` built from a profile.
pub fn recommendation_query(profile: &EmotionProfile) -> Vec<(&'static str, String)> {
    vec![
        ("limit", profile.limit.to_string()),
        ("seed_genres", profile.request_seeds()),
        ("target_valence", profile.target_valence.to_string()),
        ("target_energy", profile.target_energy.to_string()),
        ("target_danceability", profile.target_danceability.to_string()),
        ("min_popularity", MIN_POPULARITY.to_string()),
    ]
}

/// Fetches tracks from Spotify's recommendation endpoint for one profile.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `config` - API base URL
/// * `token` - Valid bearer token
/// * `profile` - Target audio features and genre seeds
///
/// # Returns
///
/// - `Ok(Vec<SpotifyTrack>)` - The tracks in the order Spotify ranked them
/// - `Err(SpotifyError::Rejected)` - Spotify answered with an error status
/// - `Err(SpotifyError::Unreachable)` - No response (network, timeout)
/// - `Err(SpotifyError::Decode)` - The 2xx body was not understood
pub async fn get_recommendations(
    client: &Client,
    config: &SpotifyConfig,
    token: &str,
    profile: &EmotionProfile,
) -> Result<Vec<SpotifyTrack>, SpotifyError> {
    let response = client
        .get(config.endpoint("recommendations"))
        .bearer_auth(token)
        .query(&recommendation_query(profile))
        .send()
        .await
        .map_err(SpotifyError::Unreachable)?;

    let response = check_status(response).await?;
    let res = response
        .json::<RecommendationsResponse>()
        .await
        .map_err(SpotifyError::Decode)?;

    Ok(res.tracks)
}
