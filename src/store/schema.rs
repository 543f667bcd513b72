use anyhow::{Result, bail};
use rusqlite::Connection;

pub const DB_VERSION: usize = 1;

pub struct Table {
    pub name: &'static str,
    pub schema: &'static str,
    pub indices: &'static [&'static str],
}

pub const USERS_TABLE: Table = Table {
    name: "users",
    schema: "CREATE TABLE users (id INTEGER NOT NULL, clerk_id TEXT NOT NULL UNIQUE, full_name TEXT, email TEXT UNIQUE, favorite_genre TEXT, created_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), subscription_end_date INTEGER, is_premium INTEGER NOT NULL DEFAULT 0, balance REAL NOT NULL DEFAULT 10000.0, subscription_plan TEXT, PRIMARY KEY (id));",
    indices: &["CREATE INDEX users_clerk_id_index ON users (clerk_id);"],
};
pub const EMOTION_HISTORY_TABLE: Table = Table {
    name: "emotion_history",
    schema: "CREATE TABLE emotion_history (id INTEGER NOT NULL, emotion TEXT NOT NULL, timestamp INTEGER DEFAULT (cast(strftime('%s','now') as int)), user_id INTEGER, PRIMARY KEY (id), CONSTRAINT user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
    indices: &["CREATE INDEX emotion_history_user_index ON emotion_history (user_id);"],
};
pub const FAVORITE_TRACKS_TABLE: Table = Table {
    name: "favorite_tracks",
    schema: "CREATE TABLE favorite_tracks (id INTEGER NOT NULL, track_name TEXT NOT NULL, artist TEXT, spotify_url TEXT, added_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), user_id INTEGER NOT NULL, PRIMARY KEY (id), CONSTRAINT user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
    indices: &[],
};
pub const PLAYLISTS_TABLE: Table = Table {
    name: "playlists",
    schema: "CREATE TABLE playlists (id INTEGER NOT NULL, name TEXT NOT NULL, created_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), user_id INTEGER NOT NULL, PRIMARY KEY (id), CONSTRAINT user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
    indices: &[],
};
pub const PLAYLIST_TRACKS_TABLE: Table = Table {
    name: "playlist_tracks",
    schema: "CREATE TABLE playlist_tracks (id INTEGER NOT NULL, playlist_id INTEGER NOT NULL, track_name TEXT NOT NULL, artist TEXT, spotify_url TEXT, added_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), PRIMARY KEY (id), CONSTRAINT playlist_id FOREIGN KEY (playlist_id) REFERENCES playlists (id) ON DELETE CASCADE);",
    indices: &[],
};
pub const RATINGS_TABLE: Table = Table {
    name: "ratings",
    schema: "CREATE TABLE ratings (id INTEGER NOT NULL, track_name TEXT NOT NULL, rating INTEGER NOT NULL, created_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), user_id INTEGER NOT NULL, PRIMARY KEY (id), CONSTRAINT user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
    indices: &[],
};
pub const LIKES_TABLE: Table = Table {
    name: "likes",
    schema: "CREATE TABLE likes (id INTEGER NOT NULL, track_name TEXT NOT NULL, artist TEXT, spotify_url TEXT, created_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), user_id INTEGER NOT NULL, PRIMARY KEY (id), CONSTRAINT user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
    indices: &[],
};
pub const DISLIKES_TABLE: Table = Table {
    name: "dislikes",
    schema: "CREATE TABLE dislikes (id INTEGER NOT NULL, track_name TEXT NOT NULL, artist TEXT, spotify_url TEXT, created_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), user_id INTEGER NOT NULL, PRIMARY KEY (id), CONSTRAINT user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
    indices: &[],
};
pub const SAVES_TABLE: Table = Table {
    name: "saves",
    schema: "CREATE TABLE saves (id INTEGER NOT NULL, track_name TEXT NOT NULL, artist TEXT, spotify_url TEXT, created_at INTEGER DEFAULT (cast(strftime('%s','now') as int)), user_id INTEGER NOT NULL, PRIMARY KEY (id), CONSTRAINT user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
    indices: &[],
};

pub const TABLES: &[Table] = &[
    USERS_TABLE,
    EMOTION_HISTORY_TABLE,
    FAVORITE_TRACKS_TABLE,
    PLAYLISTS_TABLE,
    PLAYLIST_TRACKS_TABLE,
    RATINGS_TABLE,
    LIKES_TABLE,
    DISLIKES_TABLE,
    SAVES_TABLE,
];

pub fn create_schema(conn: &Connection) -> Result<()> {
    for table in TABLES {
        conn.execute(table.schema, [])?;
        for index in table.indices {
            conn.execute(index, [])?;
        }
    }
    conn.execute(&format!("PRAGMA user_version = {}", DB_VERSION), [])?;
    Ok(())
}

/// Checks that every table exists; a partial schema means the file was not
/// created by this application.
pub fn validate_schema(conn: &Connection) -> Result<()> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in TABLES {
        let count: i64 = stmt.query_row([table.name], |row| row.get(0))?;
        if count != 1 {
            bail!("Schema validation failed, missing table {}", table.name);
        }
    }
    Ok(())
}
