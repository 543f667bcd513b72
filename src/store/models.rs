use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub clerk_id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub favorite_genre: Option<String>,
    pub created_at: DateTime<Utc>,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub is_premium: bool,
    pub balance: f64,
    pub subscription_plan: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub clerk_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub favorite_genre: Option<String>,
}

/// Fields of a profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub favorite_genre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    pub subscription_plan: Option<String>,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub is_premium: bool,
    #[serde(default)]
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub id: i64,
    pub emotion: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<i64>,
}

/// The track reference stored by favorites, reactions and playlists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRef {
    pub track_name: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrack {
    pub id: i64,
    #[serde(flatten)]
    pub track: TrackRef,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
    Save,
}

impl ReactionKind {
    pub fn table(&self) -> &'static str {
        match self {
            ReactionKind::Like => "likes",
            ReactionKind::Dislike => "dislikes",
            ReactionKind::Save => "saves",
        }
    }

    /// Parses the plural path segment used by the HTTP API (`likes`, ...).
    pub fn from_segment(segment: &str) -> Option<ReactionKind> {
        match segment {
            "likes" => Some(ReactionKind::Like),
            "dislikes" => Some(ReactionKind::Dislike),
            "saves" => Some(ReactionKind::Save),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub track_name: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}
