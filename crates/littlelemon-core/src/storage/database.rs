//! MySQL database operations
//!
//! Provides connection pool management and database creation for the
//! Little Lemon provisioner.

use crate::config::{DatabaseSettings, validate_identifier};
use crate::error::Error;
use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlDatabaseError, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

/// MySQL `ER_BAD_DB_ERROR`: the named database does not exist
const ER_BAD_DB: u16 = 1049;

/// Default maximum connections in the pool
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default timeout when acquiring a connection
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Database configuration options
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MySQL server host
    pub host: String,
    /// MySQL server port
    pub port: u16,
    /// User name for authentication
    pub user: String,
    /// Password for authentication (empty string means none)
    pub password: Option<String>,
    /// Target database name
    pub database: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Timeout when acquiring a connection from the pool
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Build a connection config from file/env settings, resolving the
    /// password from the environment.
    pub fn from_settings(settings: &DatabaseSettings) -> Result<Self> {
        validate_identifier(&settings.database)?;
        Ok(Self {
            host: settings.host.clone(),
            port: settings.port,
            user: settings.user.clone(),
            password: settings.resolved_password()?,
            database: settings.database.clone(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        })
    }

    /// Set the maximum number of connections
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the acquire timeout
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Connection options for the server itself, no schema selected.
    /// Used to create the target database before it exists.
    fn server_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        options
    }

    /// Connection options with the target database selected
    fn database_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.database)
    }
}

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl Database {
    /// Connect to an existing database.
    ///
    /// Fails if the database does not exist; read-only callers must never
    /// create it as a side effect.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.database_options())
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if let Some(mysql_err) = db_err.try_downcast_ref::<MySqlDatabaseError>() {
                        if mysql_err.number() == ER_BAD_DB {
                            return anyhow::Error::new(Error::DatabaseMissing(
                                config.database.clone(),
                            ));
                        }
                    }
                }
                anyhow::Error::new(e).context(format!(
                    "Failed to connect to database '{}' at {}:{}",
                    config.database, config.host, config.port
                ))
            })?;

        Ok(Self {
            pool,
            config: config.clone(),
        })
    }

    /// Create the target database if it is absent, then connect to it.
    ///
    /// The creation statement uses the fixed `utf8` character set of the
    /// original fixture. A no-op when the database already exists.
    pub async fn create_and_connect(config: &DatabaseConfig) -> Result<Self> {
        validate_identifier(&config.database)?;

        // Server-level connection: the database may not exist yet.
        let server_pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.server_options())
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to MySQL server at {}:{}",
                    config.host, config.port
                )
            })?;

        let create_sql = format!(
            "CREATE DATABASE IF NOT EXISTS {} DEFAULT CHARACTER SET 'utf8'",
            config.database
        );
        sqlx::query(&create_sql)
            .execute(&server_pool)
            .await
            .with_context(|| format!("Failed to create database '{}'", config.database))?;
        server_pool.close().await;

        info!(database = %config.database, "Database present and selected for use");

        Self::connect(config).await
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Get the database configuration
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Get the target database name
    pub fn name(&self) -> &str {
        &self.config.database
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseSettings;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            password: None,
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            database: "little_lemon_db".to_string(),
        }
    }

    #[test]
    fn test_config_from_settings() {
        let config = DatabaseConfig::from_settings(&settings()).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3306);
        assert_eq!(config.database, "little_lemon_db");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_config_rejects_unsafe_database_name() {
        let mut bad = settings();
        bad.database = "little_lemon_db; DROP DATABASE mysql".to_string();
        assert!(DatabaseConfig::from_settings(&bad).is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = DatabaseConfig::from_settings(&settings())
            .unwrap()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(5));
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }
}
