use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;

use crate::{
    api::{ApiError, AppState, find_user, library::Created},
    store::{Playlist, SavedTrack, TrackRef, User},
};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

/// Looks up a playlist owned by `user`; someone else's playlist is reported as
/// missing.
fn find_playlist(state: &AppState, user: &User, id: i64) -> Result<Playlist, ApiError> {
    state
        .store
        .get_playlist(id)?
        .filter(|playlist| playlist.user_id == user.id)
        .ok_or_else(|| ApiError::NotFound(format!("playlist {} not found", id)))
}

pub async fn list_playlists(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Playlist>>, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    Ok(Json(state.store.get_playlists(user.id)?))
}

pub async fn create_playlist(
    Path(clerk_id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("playlist name must not be empty".to_string()));
    }

    let user = find_user(&state, &clerk_id)?;
    let id = state.store.create_playlist(user.id, req.name.trim())?;
    Ok((StatusCode::CREATED, Json(find_playlist(&state, &user, id)?)))
}

pub async fn delete_playlist(
    Path((clerk_id, id)): Path<(String, i64)>,
    Extension(state): Extension<AppState>,
) -> Result<StatusCode, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    if !state.store.delete_playlist(user.id, id)? {
        return Err(ApiError::NotFound(format!("playlist {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_playlist_tracks(
    Path((clerk_id, id)): Path<(String, i64)>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<SavedTrack>>, ApiError> {
    let user = find_user(&state, &clerk_id)?;
    let playlist = find_playlist(&state, &user, id)?;
    Ok(Json(state.store.get_playlist_tracks(playlist.id)?))
}

pub async fn add_playlist_track(
    Path((clerk_id, id)): Path<(String, i64)>,
    Extension(state): Extension<AppState>,
    Json(track): Json<TrackRef>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    if track.track_name.trim().is_empty() {
        return Err(ApiError::BadRequest("track_name must not be empty".to_string()));
    }

    let user = find_user(&state, &clerk_id)?;
    let playlist = find_playlist(&state, &user, id)?;
    let track_id = state.store.add_playlist_track(playlist.id, &track)?;
    Ok((StatusCode::CREATED, Json(Created { id: track_id })))
}
