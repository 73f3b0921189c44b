//! Storage layer - MySQL connection, schema DDL, seed fixture, reconciliation
//!
//! # Architecture
//!
//! - `database`: connection pool management and database creation
//! - `schema`: authoritative table DDL in dependency order
//! - `seed`: the fixed sample-data fixture
//! - `reconcile`: the clear -> create -> seed -> verify procedure
//!
//! # Usage
//!
//! ```ignore
//! use littlelemon_core::storage::{reconcile, DatabaseConfig};
//!
//! let config = DatabaseConfig::from_settings(&settings)?;
//! let summary = reconcile::run(&config).await?;
//! ```

pub mod database;
pub mod reconcile;
pub mod schema;
pub mod seed;

// Re-export commonly used types
pub use database::{Database, DatabaseConfig};
pub use reconcile::{ReconcileSummary, clear_tables, reconcile as reconcile_database, run, table_counts};
pub use schema::{CREATE_ORDER, TABLE_NAMES, create_tables, table_exists};
pub use seed::EXPECTED_ROW_COUNTS;
