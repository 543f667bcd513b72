use crate::{
    api::AppState, cli::open_store, config, config::SpotifyConfig, error, info,
    management::RecommendationManager, server,
};

pub async fn serve() {
    let recommender = match RecommendationManager::new(SpotifyConfig::from_env()) {
        Ok(r) => r,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };
    let store = open_store();

    info!("Serving on http://{}", config::server_addr());
    if let Err(e) = server::start_api_server(AppState::new(recommender, store)).await {
        error!("Server stopped. Err: {}", e);
    }
}
