use axum::{
    Extension, Router,
    routing::{delete, get, post, put},
};
use std::{net::SocketAddr, str::FromStr};
use tracing::info;

use crate::{Res, api, api::AppState, config};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/emotions", get(api::emotions))
        .route("/emotions/{label}", get(api::emotion_profile))
        .route("/recommendations", get(api::recommendations))
        .route("/users", post(api::create_user))
        .route("/users/{clerk_id}", get(api::get_user).put(api::update_user))
        .route(
            "/users/{clerk_id}/subscription",
            put(api::update_subscription),
        )
        .route("/users/{clerk_id}/emotions", get(api::emotion_history))
        .route(
            "/users/{clerk_id}/favorites",
            get(api::list_favorites).post(api::add_favorite),
        )
        .route(
            "/users/{clerk_id}/favorites/{id}",
            delete(api::remove_favorite),
        )
        .route(
            "/users/{clerk_id}/ratings",
            get(api::list_ratings).post(api::rate_track),
        )
        .route(
            "/users/{clerk_id}/playlists",
            get(api::list_playlists).post(api::create_playlist),
        )
        .route(
            "/users/{clerk_id}/reactions/{kind}",
            get(api::list_reactions).post(api::add_reaction),
        )
        .route(
            "/users/{clerk_id}/reactions/{kind}/{id}",
            delete(api::remove_reaction),
        )
        .route(
            "/users/{clerk_id}/playlists/{id}",
            delete(api::delete_playlist),
        )
        .route(
            "/users/{clerk_id}/playlists/{id}/tracks",
            get(api::list_playlist_tracks).post(api::add_playlist_track),
        )
        .layer(Extension(state))
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
