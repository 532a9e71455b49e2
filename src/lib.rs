//! # Komunalka Service
//!
//! Conversational utility-billing assistant core: walks a user through
//! providing an address and meter readings, computes a bill from fixed
//! tariffs, persists it and serves bill history.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, tariff table, calculators, repository traits
//! - **application**: Intake state machine, session registry, services, ports
//! - **infrastructure**: External concerns (SQLite database, in-memory storage)
//! - **interfaces**: Conversation drivers (console)
//! - **shared**: Cross-cutting helpers (graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
