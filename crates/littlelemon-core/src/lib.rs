//! Little Lemon Core Library
//!
//! This crate provides the core functionality for the Little Lemon database
//! provisioner, including:
//! - Connection configuration (file + environment)
//! - Schema DDL and the seed data fixture
//! - The reconciliation procedure (clear, create, seed, verify)

pub mod config;
pub mod error;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::storage::{Database, DatabaseConfig, ReconcileSummary};
}
