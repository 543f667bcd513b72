use axum::{Extension, response::Json};
use chrono::Utc;
use serde_json::{Value, json};

use crate::api::AppState;

pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    let token_cached = state
        .recommender
        .tokens()
        .current_token()
        .await
        .is_some_and(|token| token.is_valid_at(Utc::now()));

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "spotify_token_cached": token_cached
    }))
}
