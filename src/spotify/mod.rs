//! # Spotify Integration Module
//!
//! Thin client for the three Spotify Web API endpoints the recommendation
//! pipeline needs. Each function performs exactly one HTTP request and maps
//! the outcome onto [`SpotifyError`]; policy (caching, fallback) lives in
//! [`crate::management`].
//!
//! ```text
//! RecommendationManager
//!          ↓
//! Spotify Integration Layer
//!     ├── auth             POST /api/token (client credentials)
//!     ├── recommendations  GET  /recommendations
//!     └── search           GET  /search
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Types
//!
//! Functions return `Result<_, SpotifyError>`. The variants separate a request
//! Spotify answered with an error status ([`SpotifyError::Rejected`]) from a
//! request that never got an answer ([`SpotifyError::Unreachable`]), because
//! only the former triggers the search fallback.

mod error;

pub mod auth;
pub mod recommendations;
pub mod search;

pub use error::SpotifyError;

use reqwest::Response;

/// Splits a response into success or [`SpotifyError::Rejected`], keeping the
/// body of the rejection for logging.
pub(crate) async fn check_status(response: Response) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SpotifyError::Rejected { status, body })
}
