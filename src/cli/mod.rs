//! # CLI Module
//!
//! Command-line front end for moodtunes. Each public function implements one
//! subcommand of the `moodtunes` binary and talks to the user through the
//! crate's colored output macros (`info!`, `success!`, `warning!`, `error!`).
//!
//! ## Commands
//!
//! - [`recommend`] - Fetch recommendations for an emotion and print them
//! - [`emotions`] - Show the emotion profiles used for recommendations
//! - [`history`] - Show a user's logged emotions
//! - [`serve`] - Run the HTTP API
//!
//! ## Usage Patterns
//!
//! ```bash
//! moodtunes recommend happy                 # Recommendations for "happy"
//! moodtunes recommend sad --user user_123   # ...and log it for a user
//! moodtunes history user_123 --limit 20     # Recent emotions of a user
//! moodtunes serve                           # Start the HTTP API
//! ```
//!
//! Fatal problems (unreadable database, failed Spotify authentication) end the
//! process through `error!`; everything else is reported and skipped.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config, error, store::SqliteStore};

mod emotions;
mod history;
mod recommend;
mod serve;

pub use emotions::emotions;
pub use history::history;
pub use recommend::recommend;
pub use serve::serve;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn open_store() -> SqliteStore {
    let path = config::database_path();
    match SqliteStore::new(&path) {
        Ok(store) => store,
        Err(e) => error!("Cannot open database {}. Err: {:#}", path.display(), e),
    }
}
