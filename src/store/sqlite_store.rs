use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use crate::store::{
    models::*,
    schema::{self, DB_VERSION},
};

const USER_COLUMNS: &str = "id, clerk_id, full_name, email, favorite_genre, created_at, subscription_end_date, is_premium, balance, subscription_plan";

/// SQLite-backed storage of users and their interaction history.
///
/// Cloning is cheap; clones share the same connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version == 0 {
            info!("Creating database schema version {}", DB_VERSION);
            schema::create_schema(&conn)?;
        } else if version as usize != DB_VERSION {
            bail!(
                "Unsupported database version {}, expected {}",
                version,
                DB_VERSION
            );
        }
        schema::validate_schema(&conn)?;

        Ok(SqliteStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }

    // users

    pub fn create_user(&self, user: &NewUser) -> Result<i64> {
        if user.clerk_id.trim().is_empty() {
            bail!("clerk_id must not be empty");
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (clerk_id, full_name, email, favorite_genre) VALUES (?1, ?2, ?3, ?4)",
            params![user.clerk_id, user.full_name, user.email, user.favorite_genre],
        )
        .with_context(|| format!("Failed to create user {}", user.clerk_id))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE clerk_id = ?1"),
                params![clerk_id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Returns `false` when no user has this id.
    pub fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE users SET full_name = COALESCE(?2, full_name), email = COALESCE(?3, email), favorite_genre = COALESCE(?4, favorite_genre) WHERE id = ?1",
            params![id, update.full_name, update.email, update.favorite_genre],
        )?;
        Ok(changed > 0)
    }

    pub fn update_subscription(&self, id: i64, update: &SubscriptionUpdate) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE users SET subscription_plan = ?2, subscription_end_date = ?3, is_premium = ?4, balance = COALESCE(?5, balance) WHERE id = ?1",
            params![
                id,
                update.subscription_plan,
                update.subscription_end_date.map(|d| d.timestamp()),
                update.is_premium,
                update.balance
            ],
        )?;
        Ok(changed > 0)
    }

    // emotion history

    /// Appends an emotion to the log. `user_id` is `None` for anonymous
    /// detections.
    pub fn record_emotion(&self, user_id: Option<i64>, emotion: &str) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO emotion_history (emotion, user_id) VALUES (?1, ?2)",
            params![emotion, user_id],
        )
        .with_context(|| format!("Failed to record emotion {}", emotion))?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent entries first.
    pub fn get_emotion_history(&self, user_id: i64, limit: usize) -> Result<Vec<EmotionEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, emotion, timestamp, user_id FROM emotion_history WHERE user_id = ?1 ORDER BY timestamp DESC, id DESC LIMIT ?2",
        )?;
        let entries = stmt
            .query_map(params![user_id, limit as i64], |row| {
                Ok(EmotionEntry {
                    id: row.get(0)?,
                    emotion: row.get(1)?,
                    timestamp: datetime_from_column(row.get(2)?),
                    user_id: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    // favorites

    pub fn add_favorite(&self, user_id: i64, track: &TrackRef) -> Result<i64> {
        self.insert_track("favorite_tracks", "user_id", user_id, track)
    }

    pub fn get_favorites(&self, user_id: i64) -> Result<Vec<SavedTrack>> {
        self.select_tracks("favorite_tracks", "added_at", "user_id", user_id)
    }

    pub fn remove_favorite(&self, user_id: i64, id: i64) -> Result<bool> {
        self.delete_track("favorite_tracks", user_id, id)
    }

    // likes, dislikes, saves

    pub fn add_reaction(&self, user_id: i64, kind: ReactionKind, track: &TrackRef) -> Result<i64> {
        self.insert_track(kind.table(), "user_id", user_id, track)
    }

    pub fn get_reactions(&self, user_id: i64, kind: ReactionKind) -> Result<Vec<SavedTrack>> {
        self.select_tracks(kind.table(), "created_at", "user_id", user_id)
    }

    pub fn remove_reaction(&self, user_id: i64, kind: ReactionKind, id: i64) -> Result<bool> {
        self.delete_track(kind.table(), user_id, id)
    }

    // ratings

    /// Stores a 1 to 5 star rating.
    pub fn rate_track(&self, user_id: i64, track_name: &str, rating: i64) -> Result<i64> {
        if !(1..=5).contains(&rating) {
            bail!("Rating must be between 1 and 5, got {}", rating);
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO ratings (track_name, rating, user_id) VALUES (?1, ?2, ?3)",
            params![track_name, rating, user_id],
        )
        .with_context(|| format!("Failed to rate {}", track_name))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_ratings(&self, user_id: i64) -> Result<Vec<Rating>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, track_name, rating, created_at FROM ratings WHERE user_id = ?1 ORDER BY id",
        )?;
        let ratings = stmt
            .query_map(params![user_id], |row| {
                Ok(Rating {
                    id: row.get(0)?,
                    track_name: row.get(1)?,
                    rating: row.get(2)?,
                    created_at: datetime_from_column(row.get(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ratings)
    }

    // playlists

    pub fn create_playlist(&self, user_id: i64, name: &str) -> Result<i64> {
        if name.trim().is_empty() {
            bail!("Playlist name must not be empty");
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO playlists (name, user_id) VALUES (?1, ?2)",
            params![name, user_id],
        )
        .with_context(|| format!("Failed to create playlist {}", name))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_playlist(&self, id: i64) -> Result<Option<Playlist>> {
        let conn = self.conn()?;
        let playlist = conn
            .query_row(
                "SELECT id, name, created_at, user_id FROM playlists WHERE id = ?1",
                params![id],
                playlist_from_row,
            )
            .optional()?;
        Ok(playlist)
    }

    pub fn get_playlists(&self, user_id: i64) -> Result<Vec<Playlist>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, created_at, user_id FROM playlists WHERE user_id = ?1 ORDER BY id",
        )?;
        let playlists = stmt
            .query_map(params![user_id], playlist_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(playlists)
    }

    /// Deletes a playlist of `user_id` together with its tracks. Returns
    /// `false` when the user owns no playlist with this id.
    pub fn delete_playlist(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM playlists WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(changed > 0)
    }

    pub fn add_playlist_track(&self, playlist_id: i64, track: &TrackRef) -> Result<i64> {
        self.insert_track("playlist_tracks", "playlist_id", playlist_id, track)
    }

    pub fn get_playlist_tracks(&self, playlist_id: i64) -> Result<Vec<SavedTrack>> {
        self.select_tracks("playlist_tracks", "added_at", "playlist_id", playlist_id)
    }

    fn insert_track(
        &self,
        table: &str,
        owner_column: &str,
        owner: i64,
        track: &TrackRef,
    ) -> Result<i64> {
        if track.track_name.trim().is_empty() {
            bail!("track_name must not be empty");
        }

        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {table} (track_name, artist, spotify_url, {owner_column}) VALUES (?1, ?2, ?3, ?4)"
            ),
            params![track.track_name, track.artist, track.spotify_url, owner],
        )
        .with_context(|| format!("Failed to add {} to {}", track.track_name, table))?;
        Ok(conn.last_insert_rowid())
    }

    fn select_tracks(
        &self,
        table: &str,
        time_column: &str,
        owner_column: &str,
        owner: i64,
    ) -> Result<Vec<SavedTrack>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, track_name, artist, spotify_url, {time_column} FROM {table} WHERE {owner_column} = ?1 ORDER BY id"
        ))?;
        let tracks = stmt
            .query_map(params![owner], |row| {
                Ok(SavedTrack {
                    id: row.get(0)?,
                    track: TrackRef {
                        track_name: row.get(1)?,
                        artist: row.get(2)?,
                        spotify_url: row.get(3)?,
                    },
                    created_at: datetime_from_column(row.get(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tracks)
    }

    fn delete_track(&self, table: &str, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            &format!("DELETE FROM {table} WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
        )?;
        Ok(changed > 0)
    }
}

fn datetime_from_column(value: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(value, 0).unwrap_or_default()
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        clerk_id: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        favorite_genre: row.get(4)?,
        created_at: datetime_from_column(row.get(5)?),
        subscription_end_date: row
            .get::<usize, Option<i64>>(6)?
            .map(datetime_from_column),
        is_premium: row.get(7)?,
        balance: row.get(8)?,
        subscription_plan: row.get(9)?,
    })
}

fn playlist_from_row(row: &Row) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: datetime_from_column(row.get(2)?),
        user_id: row.get(3)?,
    })
}
