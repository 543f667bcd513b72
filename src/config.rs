//! Configuration management for moodtunes.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every accessor falls back to a default so the
//! binary starts even on a fresh machine; the Spotify credentials default to
//! non-functional placeholders.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the current working directory
//! 4. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_CLIENT_ID: &str = "your_spotify_client_id";
pub const DEFAULT_CLIENT_SECRET: &str = "your_spotify_client_secret";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory under
/// `moodtunes/.env` first, then in the current working directory. Variables
/// that are already set in the process environment are never overwritten, and
/// a missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/moodtunes/.env`
/// - macOS: `~/Library/Application Support/moodtunes/.env`
/// - Windows: `%LOCALAPPDATA%/moodtunes/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Returns the application data directory (`<data_local_dir>/moodtunes`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodtunes");
    path
}

/// Returns the address the HTTP API binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:5000`.
pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the path of the SQLite database file.
///
/// Reads `DATABASE_PATH`, defaulting to `moodtunes.db` inside [`data_dir`].
pub fn database_path() -> PathBuf {
    match env::var("DATABASE_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_dir().join("moodtunes.db"),
    }
}

/// Returns the Spotify API client ID used for the client-credentials exchange.
///
/// Reads `CLIENT_ID`. The placeholder default lets the application start, but
/// every token request made with it will be rejected by Spotify.
pub fn spotify_client_id() -> String {
    env_or("CLIENT_ID", DEFAULT_CLIENT_ID)
}

/// Returns the Spotify API client secret.
///
/// Reads `CLIENT_SECRET`. The secret should be kept confidential and never
/// exposed in logs or version control.
pub fn spotify_client_secret() -> String {
    env_or("CLIENT_SECRET", DEFAULT_CLIENT_SECRET)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the timeout applied to every outbound Spotify request.
///
/// Reads `SPOTIFY_REQUEST_TIMEOUT_SECS`; unparsable or zero values fall back
/// to ten seconds.
pub fn request_timeout() -> Duration {
    let secs = env::var("SPOTIFY_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Everything the recommendation pipeline needs to talk to Spotify.
///
/// Built once from the environment by the binary, or by hand in tests where
/// the URLs point at a local mock server.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub timeout: Duration,
}

impl SpotifyConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: spotify_client_id(),
            client_secret: spotify_client_secret(),
            api_url: spotify_apiurl(),
            token_url: spotify_apitoken_url(),
            timeout: request_timeout(),
        }
    }

    /// Config for a locally hosted API, token endpoint at `{base}/api/token`.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: DEFAULT_CLIENT_SECRET.to_string(),
            api_url: format!("{base}/v1"),
            token_url: format!("{base}/api/token"),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Full URL of an API endpoint, e.g. `endpoint("search")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: DEFAULT_CLIENT_SECRET.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
