//! Little Lemon CLI - provision and inspect the restaurant database

use clap::{Parser, Subcommand};
use littlelemon_core::config::{Config, PASSWORD_ENV};
use littlelemon_core::storage::{self, Database, DatabaseConfig, EXPECTED_ROW_COUNTS};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "littlelemon")]
#[command(author, version, about = "Little Lemon database provisioner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and tables, then load the seed fixture
    Setup,

    /// Show per-table row counts for the target database
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("littlelemon=info".parse()?)
                .add_directive("littlelemon_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Setup => cmd_setup(cli.quiet).await,
        Commands::Status { format } => cmd_status(format, cli.quiet).await,
        Commands::Config { action } => cmd_config(action, cli.quiet),
        Commands::Doctor => cmd_doctor(cli.quiet).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn load_database_config() -> anyhow::Result<DatabaseConfig> {
    let config = Config::load()?;
    DatabaseConfig::from_settings(&config.database)
}

async fn cmd_setup(quiet: bool) -> anyhow::Result<()> {
    let db_config = load_database_config()?;
    info!(
        database = %db_config.database,
        host = %db_config.host,
        port = db_config.port,
        "Provisioning database"
    );

    if !quiet {
        println!(
            "Setting up database '{}' at {}:{}...",
            db_config.database, db_config.host, db_config.port
        );
    }

    let summary = storage::run(&db_config).await?;

    if !quiet {
        println!("Database setup complete and changes committed.");
        println!();
        for (table, count) in summary.as_pairs() {
            println!("  {:<10} {} rows", table, count);
        }
        if !summary.matches_fixture() {
            println!();
            println!("[WARNING] Row counts do not match the seed fixture.");
        }
    }

    Ok(())
}

async fn cmd_status(format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let db_config = load_database_config()?;
    debug!(database = %db_config.database, "Reading table counts");

    // Connect to the existing database only; status never creates anything
    let db = Database::connect(&db_config).await?;
    let result = storage::table_counts(db.pool()).await;
    db.close().await;
    let summary = result?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            if !quiet {
                println!("Database '{}':", db_config.database);
            }
            for (table, count) in summary.as_pairs() {
                let expected = EXPECTED_ROW_COUNTS
                    .iter()
                    .find(|(name, _)| *name == table)
                    .map(|(_, n)| *n)
                    .unwrap_or(0);
                println!("  {:<10} {}/{} rows", table, count, expected);
            }
            if !quiet {
                println!();
                if summary.matches_fixture() {
                    println!("Seed fixture is fully loaded.");
                } else {
                    println!("Row counts differ from the fixture. Run `littlelemon setup`.");
                }
            }
        }
    }

    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn cmd_doctor(quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Little Lemon Health Check");
        println!("=========================");
        println!();
    }

    let mut all_ok = true;

    // Check configuration
    let config = match Config::load() {
        Ok(config) => {
            if !quiet {
                println!("[OK] Configuration: Valid");
            }
            Some(config)
        }
        Err(e) => {
            all_ok = false;
            if !quiet {
                println!("[!!] Configuration: Error - {}", e);
            }
            None
        }
    };

    // Check password
    if let Some(config) = &config {
        match config.database.redacted_password() {
            Ok(Some(redacted)) => {
                if !quiet {
                    println!("[OK] Password: Configured ({})", redacted);
                }
            }
            Ok(None) => {
                if !quiet {
                    println!("[--] Password: Not set (assuming none required)");
                    println!("     Set the {} environment variable if needed", PASSWORD_ENV);
                }
            }
            Err(e) => {
                all_ok = false;
                if !quiet {
                    println!("[!!] Password: Error - {}", e);
                }
            }
        }
    }

    // Check config file location
    if !quiet {
        match Config::config_path() {
            Ok(path) => {
                if path.exists() {
                    println!("[OK] Config file: {}", path.display());
                } else {
                    println!("[--] Config file: {} (using defaults)", path.display());
                }
            }
            Err(e) => {
                println!("[!!] Config file: Error - {}", e);
            }
        }
    }

    // Check database
    if let Some(config) = &config {
        match DatabaseConfig::from_settings(&config.database) {
            Ok(db_config) => match Database::connect(&db_config).await {
                Ok(db) => {
                    if !quiet {
                        println!("[OK] Database: Connected ({})", db_config.database);
                    }
                    match storage::table_counts(db.pool()).await {
                        Ok(summary) => {
                            if summary.matches_fixture() {
                                if !quiet {
                                    println!("[OK] Seed fixture: Fully loaded");
                                }
                            } else {
                                all_ok = false;
                                if !quiet {
                                    println!(
                                        "[!!] Seed fixture: Row counts differ - run `littlelemon setup`"
                                    );
                                }
                            }
                        }
                        Err(e) => {
                            all_ok = false;
                            if !quiet {
                                println!("[!!] Tables: {}", e);
                                println!("     Run `littlelemon setup` to create them");
                            }
                        }
                    }
                    db.close().await;
                }
                Err(e) => {
                    all_ok = false;
                    if !quiet {
                        println!("[!!] Database: {}", e);
                        println!("     Run `littlelemon setup` to provision it");
                    }
                }
            },
            Err(e) => {
                all_ok = false;
                if !quiet {
                    println!("[!!] Database config: {}", e);
                }
            }
        }
    }

    // Summary
    if !quiet {
        println!();
        if all_ok {
            println!("All checks passed!");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }

    Ok(())
}
