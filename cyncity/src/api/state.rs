use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The only way handlers reach the entity collections.
    pub db: Arc<dyn DatabaseBackend>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}
