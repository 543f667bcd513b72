//! # API Module
//!
//! HTTP handlers for the moodtunes web server. The router itself is built in
//! [`crate::server`]; shared state reaches the handlers through an
//! [`axum::Extension`] layer carrying an [`AppState`].
//!
//! ## Endpoints
//!
//! ### Recommendations
//!
//! - [`recommendations`] - `GET /recommendations?emotion=&user=` resolves an
//!   emotion into Spotify tracks and logs the emotion
//! - [`emotions`], [`emotion_profile`] - inspect the emotion profiles
//!
//! ### Users and history
//!
//! - `POST /users`, `GET|PUT /users/{clerk_id}`,
//!   `PUT /users/{clerk_id}/subscription`, `GET /users/{clerk_id}/emotions`
//! - favorites, likes, dislikes, saves and ratings under `/users/{clerk_id}/`
//! - playlists under `/users/{clerk_id}/playlists`, scoped to their owner
//!
//! ### Monitoring
//!
//! - [`health`] - status, version and whether a Spotify token is cached
//!
//! ## Errors
//!
//! Handlers return [`ApiError`], rendered as `{"error": "..."}` with a status
//! derived from the variant. Spotify authentication problems surface as
//! `502 Bad Gateway`, an unreachable Spotify as `503 Service Unavailable`.

use std::sync::Arc;

use crate::{management::RecommendationManager, store::SqliteStore, store::User};

mod error;
mod health;
mod library;
mod playlists;
mod recommendations;
mod users;

pub use error::ApiError;
pub use health::health;
pub use library::*;
pub use playlists::*;
pub use recommendations::{emotion_profile, emotions, recommendations};
pub use users::*;

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecommendationManager>,
    pub store: SqliteStore,
}

impl AppState {
    pub fn new(recommender: RecommendationManager, store: SqliteStore) -> Self {
        Self {
            recommender: Arc::new(recommender),
            store,
        }
    }
}

pub(crate) fn find_user(state: &AppState, clerk_id: &str) -> Result<User, ApiError> {
    state
        .store
        .get_user_by_clerk_id(clerk_id)?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", clerk_id)))
}
