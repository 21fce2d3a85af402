use std::sync::Arc;

use loadboard_app::config::Config;
use loadboard_app::repository::open_posting_store;
use loadboard_store::SqlitePostingStore;
use loadboard_types::Result;

/// Shared, read-only request context
pub struct State {
    pub config: Config,
    pub store: SqlitePostingStore,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let store = open_posting_store(&config)?;

        Ok(Arc::new(Self { config, store }))
    }
}
