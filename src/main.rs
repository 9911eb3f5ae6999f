//! Circulate - catalog maintenance entry point
//!
//! Loads the catalog file and reports loan activity. The interactive UI
//! lives in the host application; this binary is the headless companion
//! for cron-style reporting.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circulate::{config::AppConfig, repository::Repository, services::Services, AppState};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("circulate={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Circulate v{}", env!("CARGO_PKG_VERSION"));

    // Open the catalog, starting fresh when no file exists yet
    let catalog_path = config.storage.catalog_path.clone();
    let repository = if Path::new(&catalog_path).exists() {
        let repository = Repository::load(&catalog_path)?;
        tracing::info!(path = %catalog_path, "catalog loaded");
        repository
    } else {
        tracing::info!(path = %catalog_path, "no catalog file, starting empty");
        Repository::new()
    };

    let services = Services::new(repository, &config.lending);
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let today = chrono::Local::now().date_naive();
    let active = state.services.lending.count_active_loans();
    let overdue = state.services.lending.count_overdue_loans(today);

    tracing::info!(active, overdue, %today, "loan report");
    println!("{} active loan(s), {} overdue as of {}", active, overdue, today);

    Ok(())
}
