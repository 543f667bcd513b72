//! Recommendation pipeline against a mocked Spotify.

use std::sync::Arc;
use std::time::Duration;

use moodtunes::config::SpotifyConfig;
use moodtunes::management::{RecommendationManager, TokenManager};
use moodtunes::spotify::SpotifyError;
use reqwest::Client;
use tokio::task::JoinSet;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_body(token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": expires_in
    })
}

fn track_json(name: &str, artists: &[&str], image: Option<&str>, preview: Option<&str>) -> Value {
    let images: Vec<Value> = image.into_iter().map(|url| json!({ "url": url })).collect();
    json!({
        "name": name,
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>(),
        "album": { "name": format!("{} OST", name), "images": images },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", name) },
        "preview_url": preview
    })
}

async fn mount_token(server: &MockServer, token: &str, expires_in: i64) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(token, expires_in)))
        .mount(server)
        .await;
}

fn manager(server: &MockServer) -> RecommendationManager {
    RecommendationManager::with_client(Client::new(), SpotifyConfig::with_base_url(&server.uri()))
}

#[tokio::test]
async fn test_token_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("client_id=your_spotify_client_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = TokenManager::new(Client::new(), SpotifyConfig::with_base_url(&server.uri()));
    assert_eq!(tokens.get_valid_token().await.unwrap(), "tok-1");
    assert_eq!(tokens.get_valid_token().await.unwrap(), "tok-1");

    let cached = tokens.current_token().await.unwrap();
    let remaining = cached.expires_at - chrono::Utc::now();
    assert!(remaining.num_seconds() > 3400 && remaining.num_seconds() <= 3540);
}

#[tokio::test]
async fn test_token_within_margin_is_refreshed() {
    let server = MockServer::start().await;
    // 60 seconds of lifetime is eaten entirely by the expiry margin
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("short", 60)))
        .expect(2)
        .mount(&server)
        .await;

    let tokens = TokenManager::new(Client::new(), SpotifyConfig::with_base_url(&server.uri()));
    tokens.get_valid_token().await.unwrap();
    tokens.get_valid_token().await.unwrap();
}

#[tokio::test]
async fn test_failed_refresh_keeps_slot_but_not_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("stale", 60)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let tokens = TokenManager::new(Client::new(), SpotifyConfig::with_base_url(&server.uri()));
    assert_eq!(tokens.get_valid_token().await.unwrap(), "stale");

    let err = tokens.get_valid_token().await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert_eq!(tokens.current_token().await.unwrap().token, "stale");
}

#[tokio::test]
async fn test_out_of_range_lifetime_is_an_error() {
    let server = MockServer::start().await;
    mount_token(&server, "forever", 100_000_000_000_000_000).await;

    let tokens = TokenManager::new(Client::new(), SpotifyConfig::with_base_url(&server.uri()));
    let err = tokens.get_valid_token().await.unwrap_err();

    assert!(matches!(
        err,
        SpotifyError::InvalidToken {
            expires_in: 100_000_000_000_000_000
        }
    ));
    assert!(err.is_auth());
    assert!(tokens.current_token().await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("shared", 3600))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(TokenManager::new(
        Client::new(),
        SpotifyConfig::with_base_url(&server.uri()),
    ));

    let mut callers = JoinSet::new();
    for _ in 0..8 {
        let tokens = Arc::clone(&tokens);
        callers.spawn(async move { tokens.get_valid_token().await });
    }

    let mut served = 0;
    while let Some(result) = callers.join_next().await {
        assert_eq!(result.unwrap().unwrap(), "shared");
        served += 1;
    }
    assert_eq!(served, 8);
}

#[tokio::test]
async fn test_recommend_happy() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .and(header("authorization", "Bearer tok-1"))
        .and(query_param("seed_genres", "hindi-pop,bollywood"))
        .and(query_param("limit", "10"))
        .and(query_param("min_popularity", "30"))
        .and(query_param("target_valence", "0.8"))
        .and(query_param("target_energy", "0.7"))
        .and(query_param("target_danceability", "0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [
                track_json("Kesariya", &["Pritam", "Arijit Singh"], Some("https://i.scdn.co/k"), None),
                track_json("Badtameez Dil", &["Benny Dayal"], None, Some("https://p.scdn.co/b")),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = manager(&server).recommend("Happy").await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "Kesariya");
    assert_eq!(tracks[0].artist, "Pritam, Arijit Singh");
    assert_eq!(tracks[0].album, "Kesariya OST");
    assert_eq!(tracks[0].image_url, "https://i.scdn.co/k");
    assert_eq!(tracks[0].preview_url, "");
    assert_eq!(tracks[0].emotion, "Happy");
    assert_eq!(tracks[1].image_url, "");
    assert_eq!(tracks[1].preview_url, "https://p.scdn.co/b");
}

#[tokio::test]
async fn test_recommend_unknown_uses_neutral() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .and(query_param("seed_genres", "hindi-chill,indie-hindi"))
        .and(query_param("limit", "10"))
        .and(query_param("target_valence", "0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [track_json("Ilahi", &["Arijit Singh"], None, None)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = manager(&server).recommend("ecstatic").await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].emotion, "ecstatic");
}

#[tokio::test]
async fn test_recommend_empty_result_is_not_an_error() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracks": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tracks = manager(&server).recommend("sad").await.unwrap();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_rejected_recommendations_use_search() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("authorization", "Bearer tok-1"))
        .and(query_param("q", "Hindi upbeat OR Bollywood joyful"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "6"))
        .and(query_param("market", "IN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [
                track_json("London Thumakda", &["Labh Janjua", "Sonu Kakkar"], None, None),
            ] }
        })))
        .mount(&server)
        .await;

    let manager = manager(&server);
    let tracks = manager.recommend("happy").await.unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].artist, "Labh Janjua, Sonu Kakkar");
    assert_eq!(tracks[0].emotion, "happy");
    assert_eq!(tracks, manager.fallback("happy", "tok-1").await);
}

#[tokio::test]
async fn test_unknown_label_falls_back_to_neutral_query() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "Hindi chill OR Bollywood relaxed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [track_json("Kho Gaye Hum Kahan", &["Jasleen Royal"], None, None)] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = manager(&server).recommend("bored").await.unwrap();
    assert_eq!(tracks.len(), 1);
}

#[tokio::test]
async fn test_padded_label_is_not_trimmed() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .and(query_param("seed_genres", "hindi-chill,indie-hindi"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "Hindi chill OR Bollywood relaxed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [track_json("Iktara", &["Kavita Seth"], None, None)] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = manager(&server).recommend(" happy ").await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].emotion, " happy ");
}

#[tokio::test]
async fn test_failing_fallback_yields_empty() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tracks = manager(&server).recommend("angry").await.unwrap();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_undecodable_fallback_yields_empty() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let tracks = manager(&server).recommend("fear").await.unwrap();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_undecodable_recommendations_propagate() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = manager(&server).recommend("happy").await.unwrap_err();
    assert!(matches!(err, SpotifyError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_api_skips_fallback() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 3600).await;

    let mut config = SpotifyConfig::with_base_url(&server.uri());
    config.api_url = "http://127.0.0.1:1/v1".to_string();
    let manager = RecommendationManager::with_client(Client::new(), config);

    let err = manager.recommend("happy").await.unwrap_err();
    assert!(matches!(err, SpotifyError::Unreachable(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_rejected_credentials_abort() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_client" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manager = manager(&server);
    let err = manager.recommend("happy").await.unwrap_err();

    match err {
        SpotifyError::AuthRejected { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("invalid_client"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(manager.tokens().current_token().await.is_none());
}

#[tokio::test]
async fn test_unreachable_token_endpoint() {
    let mut config = SpotifyConfig::default();
    config.token_url = "http://127.0.0.1:1/api/token".to_string();

    let tokens = TokenManager::new(Client::new(), config);
    let err = tokens.get_valid_token().await.unwrap_err();
    assert!(matches!(err, SpotifyError::AuthUnreachable(_)));
}
