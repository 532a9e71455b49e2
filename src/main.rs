//!
//! Conversational utility-billing assistant.
//! Reads configuration from TOML file (~/.config/komunalka/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use komunalka::application::services::{BillingService, RetentionSweeper};
use komunalka::application::session::SessionRegistry;
use komunalka::application::IntakeEngine;
use komunalka::config::AppConfig;
use komunalka::domain::TariffTable;
use komunalka::infrastructure::database::migrator::Migrator;
use komunalka::interfaces::console::{run_console, ConsoleDriver};
use komunalka::shared::shutdown::{start_signal_listener, ShutdownSignal};
use komunalka::{default_config_path, init_database, DatabaseConfig, SeaOrmRepositoryProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("KOMUNALKA_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Komunalka assistant...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Initialize repository provider
    let repos: Arc<dyn komunalka::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // ── Services ───────────────────────────────────────────────
    let tariffs = TariffTable::from_config(&app_cfg.tariffs);
    let billing = Arc::new(BillingService::new(repos.clone()));
    let sessions = SessionRegistry::shared();

    let shutdown = ShutdownSignal::new();
    start_signal_listener(&shutdown);

    // Background housekeeping: session TTL eviction and bill retention
    let session_sweeper = sessions.start_sweeper(
        chrono::Duration::minutes(app_cfg.session.ttl_minutes),
        std::time::Duration::from_secs(app_cfg.session.sweep_interval_secs),
        shutdown.clone(),
    );
    let retention = Arc::new(RetentionSweeper::new(repos.clone(), &app_cfg.retention));
    let retention_sweeper = retention.start(shutdown.clone());

    let engine = Arc::new(IntakeEngine::new(
        repos,
        billing,
        Arc::new(ConsoleDriver),
        sessions,
        tariffs,
    ));

    // ── Console loop ───────────────────────────────────────────
    info!("Assistant ready. Press Ctrl+C to shutdown gracefully.");
    run_console(engine, shutdown.clone()).await;

    // Console loop ended (quit or EOF); stop the sweepers too
    shutdown.trigger();
    let _ = session_sweeper.await;
    let _ = retention_sweeper.await;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Komunalka assistant shutdown complete");
    Ok(())
}
