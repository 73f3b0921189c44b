//! Configuration management with file persistence
//!
//! Connection parameters live in `config.toml`; the database password is
//! deliberately environment-only and never written to disk.

use crate::error::Error;
use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable holding the database password
pub const PASSWORD_ENV: &str = "LITTLELEMON_DB_PASSWORD";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "LITTLELEMON_CONFIG_DIR";

/// Fixed target database name used by the original provisioning fixture
pub const DEFAULT_DATABASE: &str = "little_lemon_db";

/// Little Lemon provisioner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(skip)]
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub database: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                password: None,
                host: "127.0.0.1".to_string(),
                port: 3306,
                user: "root".to_string(),
                database: DEFAULT_DATABASE.to_string(),
            },
        }
    }
}

impl DatabaseSettings {
    /// Resolve the password from the environment.
    ///
    /// Passwords are never stored in the config file; `LITTLELEMON_DB_PASSWORD`
    /// is the only accepted source.
    pub fn resolved_password(&self) -> anyhow::Result<Option<String>> {
        self.enforce_env_only()?;
        Ok(env::var(PASSWORD_ENV).ok())
    }

    /// Redacted form of the password for diagnostics output
    pub fn redacted_password(&self) -> anyhow::Result<Option<String>> {
        self.resolved_password()
            .map(|opt| opt.map(|secret| redact(&secret)))
    }

    pub fn enforce_env_only(&self) -> crate::error::Result<()> {
        if self.password.is_some() {
            return Err(Error::Config(format!(
                "Database passwords must be provided via the {} environment variable, \
                 not stored in configuration",
                PASSWORD_ENV
            )));
        }
        Ok(())
    }
}

/// Mask a secret, keeping at most the last two characters.
///
/// Works on characters rather than bytes so multibyte passwords redact
/// cleanly. Short secrets are masked entirely.
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        "***".to_string()
    } else {
        let suffix: String = chars[chars.len() - 2..].iter().collect();
        format!("***{}", suffix)
    }
}

/// Validate that a name is safe to interpolate into SQL as an identifier.
///
/// Identifiers cannot be bound as statement parameters, so the database name
/// is restricted to `[A-Za-z_][A-Za-z0-9_]*` before it reaches any statement.
pub fn validate_identifier(name: &str) -> crate::error::Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(Error::InvalidInput(format!(
            "Invalid database name '{}': only letters, digits and underscores are allowed",
            name
        )));
    }
    Ok(())
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("littlelemon")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or return defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.database.enforce_env_only()?;
        Ok(validate_identifier(&self.database.database)?)
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "database.host" => Ok(self.database.host.clone()),
            "database.port" => Ok(self.database.port.to_string()),
            "database.user" => Ok(self.database.user.clone()),
            "database.database" => Ok(self.database.database.clone()),

            // Password (special handling - show redacted)
            "database.password" | "password" => match self.database.redacted_password()? {
                Some(redacted) => Ok(redacted),
                None => Ok(format!("(not set - use {} env var)", PASSWORD_ENV)),
            },

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `littlelemon config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "database.host" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("Host must not be empty"));
                }
                self.database.host = value.to_string();
            }
            "database.port" => {
                let port: u16 = value
                    .parse()
                    .with_context(|| format!("Invalid port value: {}", value))?;
                if port == 0 {
                    return Err(anyhow!("Port must be between 1 and 65535"));
                }
                self.database.port = port;
            }
            "database.user" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("User must not be empty"));
                }
                self.database.user = value.to_string();
            }
            "database.database" => {
                validate_identifier(value)?;
                self.database.database = value.to_string();
            }

            // Password cannot be set via config
            "database.password" | "password" => {
                return Err(anyhow!(
                    "Passwords cannot be stored in configuration for security. \
                     Set the {} environment variable instead.",
                    PASSWORD_ENV
                ));
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `littlelemon config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "database.host",
            "database.port",
            "database.user",
            "database.database",
            "database.password",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.database.password.is_none());
        assert_eq!(config.database.host, "127.0.0.1");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.database.database, DEFAULT_DATABASE);
    }

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        assert_eq!(config.get("database.host").unwrap(), "127.0.0.1");
        assert_eq!(config.get("database.port").unwrap(), "3306");
        assert_eq!(config.get("database.database").unwrap(), "little_lemon_db");
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let config = Config::default();
        assert!(config.get("database.timeout").is_err());
    }

    #[test]
    fn test_set_validates_port() {
        let mut config = Config::default();
        assert!(config.set("database.port", "0").is_err());
        assert!(config.set("database.port", "notaport").is_err());
        config.set("database.port", "3307").unwrap();
        assert_eq!(config.database.port, 3307);
    }

    #[test]
    fn test_set_rejects_password() {
        let mut config = Config::default();
        let err = config.set("database.password", "hunter2").unwrap_err();
        assert!(err.to_string().contains(PASSWORD_ENV));
    }

    #[test]
    fn test_set_validates_database_name() {
        let mut config = Config::default();
        assert!(config.set("database.database", "little lemon").is_err());
        assert!(config.set("database.database", "db; DROP TABLE x").is_err());
        config.set("database.database", "little_lemon_test").unwrap();
        assert_eq!(config.database.database, "little_lemon_test");
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unsafe_database_name() {
        let mut config = Config::default();
        config.database.database = "little lemon; --".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enforce_env_only() {
        let mut config = Config::default();
        config.database.password = Some("hunter2".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(PASSWORD_ENV));
        let code = err.downcast_ref::<Error>().map(Error::code);
        assert_eq!(code, Some("E200"));
    }

    #[test]
    fn test_redact_keeps_two_char_suffix() {
        assert_eq!(redact("supersecret"), "***et");
        assert_eq!(redact("hunter2"), "***r2");
    }

    #[test]
    fn test_redact_masks_short_secrets_entirely() {
        assert_eq!(redact("abcd"), "***");
        assert_eq!(redact(""), "***");
    }

    #[test]
    fn test_redact_handles_multibyte_characters() {
        // Character-boundary safe even when the secret ends in multibyte text
        assert_eq!(redact("abcd€"), "***d€");
        assert_eq!(redact("pässwörd"), "***rd");
        assert_eq!(redact("abc€"), "***");
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("little_lemon_db").is_ok());
        assert!(validate_identifier("_tmp42").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1db").is_err());
        assert!(validate_identifier("db-name").is_err());
        assert!(validate_identifier("db`; --").is_err());
    }

    #[test]
    fn test_list_includes_all_keys() {
        let config = Config::default();
        let items = config.list().unwrap();
        let keys: Vec<_> = items.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"database.host"));
        assert!(keys.contains(&"database.password"));
        assert_eq!(items.len(), 5);
    }
}
