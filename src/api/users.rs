use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    api::{ApiError, AppState, find_user},
    store::{EmotionEntry, NewUser, ProfileUpdate, SubscriptionUpdate, User},
};

const DEFAULT_HISTORY_LIMIT: usize = 50;

pub async fn create_user(
    Extension(state): Extension<AppState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if user.clerk_id.trim().is_empty() {
        return Err(ApiError::BadRequest("clerk_id must not be empty".to_string()));
    }
    if state.store.get_user_by_clerk_id(&user.clerk_id)?.is_some() {
        return Err(ApiError::Conflict(format!(
            "user {} already exists",
            user.clerk_id
        )));
    }

    let id = state.store.create_user(&user)?;
    let created = state
        .store
        .get_user(id)?
        .ok_or_else(|| ApiError::NotFound(format!("user {} vanished", id)))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_user(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(find_user(&state, &clerk_id)?))
}

pub async fn update_user(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    state.store.update_profile(user.id, &update)?;
    Ok(Json(find_user(&state, &clerk_id)?))
}

pub async fn update_subscription(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(update): Json<SubscriptionUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    if update.balance.is_some_and(|b| b < 0.0) {
        return Err(ApiError::BadRequest("balance must not be negative".to_string()));
    }

    state.store.update_subscription(user.id, &update)?;
    Ok(Json(find_user(&state, &clerk_id)?))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

pub async fn emotion_history(
    Path(clerk_id): Path<String>,
    Query(params): Query<HistoryParams>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<EmotionEntry>>, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Ok(Json(state.store.get_emotion_history(user.id, limit)?))
}
