use moodtunes::emotion::{Emotion, EmotionProfile, resolve};
use moodtunes::spotify::recommendations::{MIN_POPULARITY, recommendation_query};

fn query_value(query: &[(&'static str, String)], key: &str) -> String {
    query
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| panic!("missing query parameter {}", key))
}

#[test]
fn test_resolve_known_emotions() {
    let expected: [(&str, f64, f64, f64, [&str; 2], u32); 6] = [
        ("happy", 0.8, 0.7, 0.7, ["hindi-pop", "bollywood"], 10),
        ("sad", 0.2, 0.3, 0.3, ["hindi-sad", "bollywood"], 10),
        ("angry", 0.3, 0.9, 0.5, ["hindi-rock", "punjabi-rock"], 8),
        ("fear", 0.3, 0.6, 0.4, ["hindi-ambient", "filmi"], 6),
        ("surprise", 0.7, 0.8, 0.6, ["hindi-dance", "bollywood"], 8),
        ("neutral", 0.5, 0.5, 0.5, ["hindi-chill", "indie-hindi"], 10),
    ];

    for (label, valence, energy, danceability, seeds, limit) in expected {
        let profile = resolve(label);
        assert_eq!(profile.emotion.as_str(), label);
        assert_eq!(profile.target_valence, valence, "{}", label);
        assert_eq!(profile.target_energy, energy, "{}", label);
        assert_eq!(profile.target_danceability, danceability, "{}", label);
        assert_eq!(profile.seed_genres, &seeds[..], "{}", label);
        assert_eq!(profile.limit, limit, "{}", label);
    }
}

#[test]
fn test_resolve_ignores_case() {
    for label in ["HAPPY", "Happy", "hApPy"] {
        assert_eq!(resolve(label).emotion, Emotion::Happy, "{:?}", label);
    }
    assert_eq!(resolve("SURPRISE").emotion, Emotion::Surprise);
}

#[test]
fn test_unknown_emotion_is_neutral() {
    for label in ["ecstatic", "", "joy", "happy!", "disgust"] {
        assert_eq!(resolve(label), Emotion::Neutral.profile(), "{:?}", label);
    }
    assert!(Emotion::parse("ecstatic").is_none());
    assert_eq!(Emotion::from_label("ecstatic"), Emotion::Neutral);
}

#[test]
fn test_surrounding_whitespace_is_neutral() {
    for label in [" happy ", "happy\n", "\tsad", " "] {
        assert_eq!(resolve(label).emotion, Emotion::Neutral, "{:?}", label);
        assert!(Emotion::parse(label).is_none(), "{:?}", label);
    }
    assert_eq!(
        Emotion::from_label(" happy ").search_query(),
        "Hindi chill OR Bollywood relaxed"
    );
}

#[test]
fn test_search_queries() {
    assert_eq!(Emotion::Happy.search_query(), "Hindi upbeat OR Bollywood joyful");
    assert_eq!(Emotion::Sad.search_query(), "Hindi sad OR Bollywood emotional");
    assert_eq!(Emotion::Angry.search_query(), "Hindi intense OR Bollywood rock");
    assert_eq!(Emotion::Fear.search_query(), "Hindi suspenseful OR Bollywood eerie");
    assert_eq!(Emotion::Surprise.search_query(), "Hindi energetic OR Bollywood dance");
    assert_eq!(
        Emotion::from_label("bored").search_query(),
        "Hindi chill OR Bollywood relaxed"
    );
}

#[test]
fn test_happy_request_parameters() {
    let query = recommendation_query(resolve("Happy"));

    assert_eq!(query_value(&query, "limit"), "10");
    assert_eq!(query_value(&query, "seed_genres"), "hindi-pop,bollywood");
    assert_eq!(query_value(&query, "target_valence"), "0.8");
    assert_eq!(query_value(&query, "target_energy"), "0.7");
    assert_eq!(query_value(&query, "target_danceability"), "0.7");
    assert_eq!(query_value(&query, "min_popularity"), "30");
    assert_eq!(MIN_POPULARITY, 30);
}

#[test]
fn test_unknown_request_parameters() {
    let query = recommendation_query(resolve("ecstatic"));

    assert_eq!(query_value(&query, "limit"), "10");
    assert_eq!(query_value(&query, "seed_genres"), "hindi-chill,indie-hindi");
    assert_eq!(query_value(&query, "target_valence"), "0.5");
}

#[test]
fn test_request_seeds_never_exceed_two() {
    for emotion in Emotion::ALL {
        let seeds = emotion.profile().request_seeds();
        assert!(seeds.split(',').count() <= 2, "{}", emotion);
    }
}

#[test]
fn test_request_seeds_keep_first_two() {
    let profile = EmotionProfile {
        emotion: Emotion::Happy,
        target_valence: 0.8,
        target_energy: 0.7,
        target_danceability: 0.7,
        seed_genres: &["a", "b", "c"],
        limit: 10,
    };
    assert_eq!(profile.request_seeds(), "a,b");

    let single = EmotionProfile {
        seed_genres: &["solo"],
        ..profile
    };
    assert_eq!(single.request_seeds(), "solo");
}

#[test]
fn test_emotion_display_and_serde() {
    assert_eq!(Emotion::Fear.to_string(), "fear");
    assert_eq!(serde_json::to_value(Emotion::Surprise).unwrap(), "surprise");
}
