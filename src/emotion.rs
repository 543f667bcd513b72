//! Emotion labels and the recommendation parameters attached to each one.
//!
//! The set of emotions is closed. Any label outside of it resolves to
//! [`Emotion::Neutral`], which is the regular default branch rather than an
//! error.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fear,
    Surprise,
    Neutral,
}

/// Target audio features, genre seeds and result size for one emotion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionProfile {
    pub emotion: Emotion,
    pub target_valence: f64,
    pub target_energy: f64,
    pub target_danceability: f64,
    pub seed_genres: &'static [&'static str],
    pub limit: u32,
}

const HAPPY: EmotionProfile = EmotionProfile {
    emotion: Emotion::Happy,
    target_valence: 0.8,
    target_energy: 0.7,
    target_danceability: 0.7,
    seed_genres: &["hindi-pop", "bollywood"],
    limit: 10,
};

const SAD: EmotionProfile = EmotionProfile {
    emotion: Emotion::Sad,
    target_valence: 0.2,
    target_energy: 0.3,
    target_danceability: 0.3,
    seed_genres: &["hindi-sad", "bollywood"],
    limit: 10,
};

const ANGRY: EmotionProfile = EmotionProfile {
    emotion: Emotion::Angry,
    target_valence: 0.3,
    target_energy: 0.9,
    target_danceability: 0.5,
    seed_genres: &["hindi-rock", "punjabi-rock"],
    limit: 8,
};

const FEAR: EmotionProfile = EmotionProfile {
    emotion: Emotion::Fear,
    target_valence: 0.3,
    target_energy: 0.6,
    target_danceability: 0.4,
    seed_genres: &["hindi-ambient", "filmi"],
    limit: 6,
};

const SURPRISE: EmotionProfile = EmotionProfile {
    emotion: Emotion::Surprise,
    target_valence: 0.7,
    target_energy: 0.8,
    target_danceability: 0.6,
    seed_genres: &["hindi-dance", "bollywood"],
    limit: 8,
};

const NEUTRAL: EmotionProfile = EmotionProfile {
    emotion: Emotion::Neutral,
    target_valence: 0.5,
    target_energy: 0.5,
    target_danceability: 0.5,
    seed_genres: &["hindi-chill", "indie-hindi"],
    limit: 10,
};

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Matches a free-form label against the known emotions, case-insensitively.
    /// Whitespace is significant: `" happy "` is not a known emotion.
    ///
    /// Returns `None` for anything unknown; [`Emotion::from_label`] is the
    /// variant that applies the neutral default.
    pub fn parse(label: &str) -> Option<Emotion> {
        match label.to_lowercase().as_str() {
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "angry" => Some(Emotion::Angry),
            "fear" => Some(Emotion::Fear),
            "surprise" => Some(Emotion::Surprise),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Emotion {
        Emotion::parse(label).unwrap_or(Emotion::Neutral)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn profile(&self) -> &'static EmotionProfile {
        match self {
            Emotion::Happy => &HAPPY,
            Emotion::Sad => &SAD,
            Emotion::Angry => &ANGRY,
            Emotion::Fear => &FEAR,
            Emotion::Surprise => &SURPRISE,
            Emotion::Neutral => &NEUTRAL,
        }
    }

    /// Free-text query used by the search fallback.
    pub fn search_query(&self) -> &'static str {
        match self {
            Emotion::Happy => "Hindi upbeat OR Bollywood joyful",
            Emotion::Sad => "Hindi sad OR Bollywood emotional",
            Emotion::Angry => "Hindi intense OR Bollywood rock",
            Emotion::Fear => "Hindi suspenseful OR Bollywood eerie",
            Emotion::Surprise => "Hindi energetic OR Bollywood dance",
            Emotion::Neutral => "Hindi chill OR Bollywood relaxed",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a label to its recommendation profile, defaulting to neutral.
pub fn resolve(label: &str) -> &'static EmotionProfile {
    Emotion::from_label(label).profile()
}

impl EmotionProfile {
    /// Seeds sent to Spotify. The recommendation endpoint only takes a few
    /// seeds, so at most the first two are used.
    pub fn request_seeds(&self) -> String {
        self.seed_genres
            .iter()
            .take(2)
            .copied()
            .collect::<Vec<_>>()
            .join(",")
    }
}
