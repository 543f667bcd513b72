//! Relational storage of users and their music-interaction history.

mod models;
mod schema;
mod sqlite_store;

pub use models::*;
pub use sqlite_store::SqliteStore;
