use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use closet_tracker::api::{self, AppState};
use closet_tracker::config::Config;
use closet_tracker::storage::{SqliteStorage, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    closet_tracker::init_logging()?;

    info!("Starting Closet Tracker");

    // Load configuration
    let config = Config::load()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.database_path).await?;
    storage.migrate().await?;
    info!("Using database {}", config.database_path);

    let state = AppState {
        store: Arc::new(storage),
        bcrypt_cost: config.bcrypt_cost,
    };

    api::serve(&config.bind_addr, state).await
}
