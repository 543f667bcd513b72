use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    config::SpotifyConfig,
    emotion::{self, Emotion},
    management::TokenManager,
    spotify::{self, SpotifyError},
    types::TrackSummary,
    utils,
};

/// Turns emotion labels into Spotify track recommendations.
///
/// Owns the HTTP client and the token cache. One instance is meant to be
/// shared by the whole process (wrap it in an `Arc`).
pub struct RecommendationManager {
    client: Client,
    config: SpotifyConfig,
    tokens: TokenManager,
}

impl RecommendationManager {
    /// Builds the manager with a client that enforces `config.timeout`.
    pub fn new(config: SpotifyConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: SpotifyConfig) -> Self {
        let tokens = TokenManager::new(client.clone(), config.clone());
        Self {
            client,
            config,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Recommends tracks for a free-form emotion label.
    ///
    /// # Flow
    ///
    /// 1. The label is resolved to a profile (unknown labels use neutral).
    /// 2. A token is taken from the cache; failing to get one is fatal.
    /// 3. The recommendation endpoint is queried with the profile.
    /// 4. If Spotify rejects that request with an error status, the keyword
    ///    search fallback runs instead and its result, possibly empty, is
    ///    returned.
    ///
    /// # Errors
    ///
    /// - Auth errors from the token cache
    /// - [`SpotifyError::Unreachable`] when the recommendation request got no
    ///   response at all (the fallback is not attempted)
    /// - [`SpotifyError::Decode`] when a 2xx body could not be decoded
    ///
    /// [`SpotifyError::Rejected`] is never returned.
    pub async fn recommend(&self, label: &str) -> Result<Vec<TrackSummary>, SpotifyError> {
        let profile = emotion::resolve(label);
        debug!("Resolved {:?} to the {} profile", label, profile.emotion);

        let token = self.tokens.get_valid_token().await?;

        match spotify::recommendations::get_recommendations(
            &self.client,
            &self.config,
            &token,
            profile,
        )
        .await
        {
            Ok(tracks) => Ok(utils::summarize_tracks(&tracks, label)),
            Err(SpotifyError::Rejected { status, body }) => {
                warn!("Spotify recommendations rejected ({}): {}", status, body);
                Ok(self.fallback(label, &token).await)
            }
            Err(e) => Err(e),
        }
    }

    /// Keyword search used when the recommendation endpoint refuses a request.
    ///
    /// Every failure is logged and turned into an empty list.
    pub async fn fallback(&self, label: &str, token: &str) -> Vec<TrackSummary> {
        let query = Emotion::from_label(label).search_query();

        match spotify::search::search_tracks(&self.client, &self.config, token, query).await {
            Ok(tracks) => utils::summarize_tracks(&tracks, label),
            Err(e) => {
                warn!("Fallback search for {:?} failed: {}", label, e);
                Vec::new()
            }
        }
    }
}
