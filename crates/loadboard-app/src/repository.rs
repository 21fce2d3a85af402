//! Repository adapters for persistence layer

use loadboard_store::SqlitePostingStore;
use loadboard_types::Result;

use crate::config::Config;

/// Open the posting store at the configured database path
pub fn open_posting_store(config: &Config) -> Result<SqlitePostingStore> {
    SqlitePostingStore::open(config.database_path()?)
}
