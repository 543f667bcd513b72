use tabled::Table;

use crate::{cli::open_store, error, info, utils, warning};

/// Prints the most recent emotions logged for a user.
pub async fn history(clerk_id: String, limit: usize) {
    let store = open_store();

    let user = match store.get_user_by_clerk_id(&clerk_id) {
        Ok(Some(user)) => user,
        Ok(None) => error!("User {} not found.", clerk_id),
        Err(e) => error!("Cannot look up user {}. Err: {:#}", clerk_id, e),
    };

    let entries = match store.get_emotion_history(user.id, limit) {
        Ok(entries) => entries,
        Err(e) => error!("Cannot load emotion history. Err: {:#}", e),
    };

    if entries.is_empty() {
        warning!("No emotions recorded for {} yet.", clerk_id);
        return;
    }

    info!("Last {} emotions of {}:", entries.len(), clerk_id);
    println!("{}", Table::new(utils::history_table_rows(&entries)));
}
