//! Emotion-driven music recommendation backend.
//!
//! This library turns a detected emotion label (e.g. `"happy"`) into a list of
//! Spotify track recommendations and keeps a small SQLite history of users and
//! their interactions with the recommended music.
//!
//! # Modules
//!
//! - `api` - HTTP handlers served by the axum router
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `emotion` - Emotion labels and their recommendation profiles
//! - `management` - Token cache and recommendation orchestration
//! - `server` - HTTP server wiring
//! - `spotify` - Spotify Web API client implementation
//! - `store` - SQLite persistence of users and interaction history
//! - `types` - Data structures and type definitions
//! - `utils` - Normalization and formatting helpers
//!
//! # Example
//!
//! ```
//! use moodtunes::{config, management::RecommendationManager};
//!
//! #[tokio::main]
//! async fn main() -> moodtunes::Res<()> {
//!     config::load_env().await?;
//!     let recommender = RecommendationManager::new(config::SpotifyConfig::from_env())?;
//!     let tracks = recommender.recommend("happy").await?;
//!     println!("{} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod emotion;
pub mod management;
pub mod server;
pub mod spotify;
pub mod store;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the binary and the outer layers where the concrete error type
/// does not matter. Library components return typed errors instead
/// ([`spotify::SpotifyError`], [`anyhow::Error`] for the store).
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching recommendations for {}", emotion);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Recorded emotion for {}", user);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the CLI layer. Library code never calls this.
///
/// # Example
///
/// ```
/// error!("Failed to open database: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("No recommendations found for {}", emotion);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
