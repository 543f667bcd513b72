use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiError, AppState, find_user},
    store::{Rating, ReactionKind, SavedTrack, TrackRef},
};

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub track_name: String,
    pub rating: i64,
}

fn reaction_kind(segment: &str) -> Result<ReactionKind, ApiError> {
    ReactionKind::from_segment(segment)
        .ok_or_else(|| ApiError::NotFound(format!("unknown collection {}", segment)))
}

fn validate_track(track: &TrackRef) -> Result<(), ApiError> {
    if track.track_name.trim().is_empty() {
        return Err(ApiError::BadRequest("track_name must not be empty".to_string()));
    }
    Ok(())
}

pub async fn list_favorites(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<SavedTrack>>, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    Ok(Json(state.store.get_favorites(user.id)?))
}

pub async fn add_favorite(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(track): Json<TrackRef>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    validate_track(&track)?;
    let user = find_user(&state, &clerk_id)?;
    let id = state.store.add_favorite(user.id, &track)?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn remove_favorite(
    Path((clerk_id, id)): Path<(String, i64)>,
    Extension(state): Extension<AppState>,
) -> Result<StatusCode, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    if !state.store.remove_favorite(user.id, id)? {
        return Err(ApiError::NotFound(format!("favorite {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_reactions(
    Path((clerk_id, kind)): Path<(String, String)>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<SavedTrack>>, ApiError> {
    let kind = reaction_kind(&kind)?;
    let user = find_user(&state, &clerk_id)?;
    Ok(Json(state.store.get_reactions(user.id, kind)?))
}

pub async fn add_reaction(
    Path((clerk_id, kind)): Path<(String, String)>,
    Extension(state): Extension<AppState>,
    Json(track): Json<TrackRef>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let kind = reaction_kind(&kind)?;
    validate_track(&track)?;
    let user = find_user(&state, &clerk_id)?;
    let id = state.store.add_reaction(user.id, kind, &track)?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn remove_reaction(
    Path((clerk_id, kind, id)): Path<(String, String, i64)>,
    Extension(state): Extension<AppState>,
) -> Result<StatusCode, ApiError> {
    let kind = reaction_kind(&kind)?;
    let user = find_user(&state, &clerk_id)?;
    if !state.store.remove_reaction(user.id, kind, id)? {
        return Err(ApiError::NotFound(format!("{} {} not found", kind.table(), id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_ratings(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Rating>>, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    Ok(Json(state.store.get_ratings(user.id)?))
}

pub async fn rate_track(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(req): Json<RatingRequest>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    if req.track_name.trim().is_empty() {
        return Err(ApiError::BadRequest("track_name must not be empty".to_string()));
    }
    if !(1..=5).contains(&req.rating) {
        return Err(ApiError::BadRequest(format!(
            "rating must be between 1 and 5, got {}",
            req.rating
        )));
    }

    let user = find_user(&state, &clerk_id)?;
    let id = state.store.rate_track(user.id, &req.track_name, req.rating)?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}
