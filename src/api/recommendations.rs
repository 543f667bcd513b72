use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::{ApiError, AppState, find_user},
    emotion::{self, Emotion},
    types::TrackSummary,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub emotion: String,
    pub user: Option<String>,
}

/// `GET /recommendations?emotion=<label>[&user=<clerk_id>]`
///
/// Logs the detected emotion (for the user when one is given, anonymously
/// otherwise) and answers with the recommended tracks. An empty list is a
/// valid answer: it means both Spotify paths came back empty.
pub async fn recommendations(
    Query(params): Query<RecommendationParams>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<TrackSummary>>, ApiError> {
    let label = params.emotion.as_str();
    if label.trim().is_empty() {
        return Err(ApiError::BadRequest("emotion must not be empty".to_string()));
    }

    let user_id = match params.user.as_deref() {
        Some(clerk_id) => Some(find_user(&state, clerk_id)?.id),
        None => None,
    };
    state
        .store
        .record_emotion(user_id, &label.to_lowercase())?;

    let tracks = state.recommender.recommend(label).await?;
    Ok(Json(tracks))
}

/// `GET /emotions` lists the known emotions with their profiles.
pub async fn emotions() -> Json<Value> {
    let profiles: Vec<_> = Emotion::ALL.iter().map(|e| e.profile()).collect();
    Json(json!(profiles))
}

/// `GET /emotions/{label}` shows the profile a label resolves to.
pub async fn emotion_profile(Path(label): Path<String>) -> Json<Value> {
    let profile = emotion::resolve(&label);
    Json(json!({
        "label": label,
        "known": Emotion::parse(&label).is_some(),
        "profile": profile,
        "search_query": profile.emotion.search_query()
    }))
}
