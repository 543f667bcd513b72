use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    config::SpotifyConfig,
    spotify::{self, SpotifyError},
    types::CachedToken,
};

/// Seconds shaved off the lifetime Spotify declares for a token.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Single-slot cache for the client-credentials access token.
///
/// The slot is guarded by an async mutex that stays locked for the whole
/// check-and-refresh sequence, so concurrent callers wait for one exchange
/// instead of issuing their own.
pub struct TokenManager {
    client: Client,
    config: SpotifyConfig,
    slot: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(client: Client, config: SpotifyConfig) -> Self {
        TokenManager {
            client,
            config,
            slot: Mutex::new(None),
        }
    }

    /// Returns a token that is valid right now, exchanging credentials for a
    /// new one when the cached token is missing or expired.
    ///
    /// A failed exchange is returned to the caller and leaves the slot as it
    /// was; the expired token in it is never handed out.
    pub async fn get_valid_token(&self) -> Result<String, SpotifyError> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.is_valid_at(Utc::now()) {
                debug!("Using cached Spotify token");
                return Ok(cached.token.clone());
            }
        }

        let issued_at = Utc::now();
        let fresh = spotify::auth::request_client_token(&self.client, &self.config).await?;
        let expires_at = expiry_time(issued_at, fresh.expires_in).ok_or(
            SpotifyError::InvalidToken {
                expires_in: fresh.expires_in,
            },
        )?;

        info!(
            "Fetched new Spotify token, valid until {}",
            expires_at.to_rfc3339()
        );
        *slot = Some(CachedToken {
            token: fresh.access_token.clone(),
            expires_at,
        });

        Ok(fresh.access_token)
    }

    /// Snapshot of the cached token, if any.
    pub async fn current_token(&self) -> Option<CachedToken> {
        self.slot.lock().await.clone()
    }

    pub async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}

/// `issued_at + expires_in - EXPIRY_MARGIN_SECS`, or `None` when the lifetime
/// falls outside the range chrono can represent.
fn expiry_time(issued_at: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    expires_in
        .checked_sub(EXPIRY_MARGIN_SECS)
        .and_then(TimeDelta::try_seconds)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_subtracts_margin() {
        let issued_at = Utc::now();
        let expires_at = expiry_time(issued_at, 3600).unwrap();
        assert_eq!((expires_at - issued_at).num_seconds(), 3540);
    }

    #[test]
    fn expiry_rejects_unrepresentable_lifetimes() {
        let issued_at = Utc::now();
        assert!(expiry_time(issued_at, 100_000_000_000_000_000).is_none());
        assert!(expiry_time(issued_at, i64::MAX).is_none());
        assert!(expiry_time(issued_at, i64::MIN).is_none());
    }
}
