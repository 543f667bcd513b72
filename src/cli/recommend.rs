use tabled::Table;

use crate::{
    cli::{open_store, spinner},
    config::SpotifyConfig,
    emotion::Emotion,
    error, info,
    management::RecommendationManager,
    success, utils, warning,
};

/// Prints recommendations for `emotion` and optionally logs it for a user.
///
/// Unknown emotions are not an error; they are announced with a warning and
/// served with the neutral profile. When `user` is given, the emotion is
/// appended to that user's history after the recommendations were printed.
pub async fn recommend(emotion: String, user: Option<String>) {
    if Emotion::parse(&emotion).is_none() {
        warning!("Unknown emotion '{}', using the neutral profile.", emotion);
    }

    let recommender = match RecommendationManager::new(SpotifyConfig::from_env()) {
        Ok(r) => r,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };

    let pb = spinner(&format!("Fetching recommendations for {}...", emotion));
    let result = recommender.recommend(&emotion).await;
    pb.finish_and_clear();

    let tracks = match result {
        Ok(tracks) => tracks,
        Err(e) if e.is_auth() => error!(
            "Spotify authentication failed. Check CLIENT_ID and CLIENT_SECRET.\n Error: {}",
            e
        ),
        Err(e) => error!("Failed to fetch recommendations. Err: {}", e),
    };

    if tracks.is_empty() {
        warning!("No recommendations found for {}.", emotion);
    } else {
        info!("{} recommendations for {}:", tracks.len(), emotion);
        println!("{}", Table::new(utils::track_table_rows(&tracks)));
    }

    if let Some(clerk_id) = user {
        let store = open_store();
        let user = match store.get_user_by_clerk_id(&clerk_id) {
            Ok(Some(user)) => user,
            Ok(None) => {
                warning!("User {} not found, emotion not recorded.", clerk_id);
                return;
            }
            Err(e) => error!("Cannot look up user {}. Err: {:#}", clerk_id, e),
        };

        let normalized = emotion.to_lowercase();
        match store.record_emotion(Some(user.id), &normalized) {
            Ok(_) => success!("Recorded {} for {}.", normalized, clerk_id),
            Err(e) => warning!("Failed to record emotion. Err: {:#}", e),
        }
    }
}
