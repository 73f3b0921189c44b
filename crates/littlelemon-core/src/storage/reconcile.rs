//! The reconciliation procedure
//!
//! Brings the target database to the known schema-and-data state:
//! clear existing rows, create tables if absent, insert the seed fixture,
//! then read back per-table counts. Re-runnable without accumulating rows.

use crate::storage::database::{Database, DatabaseConfig};
use crate::storage::schema::{self, CREATE_ORDER};
use crate::storage::seed::{self, EXPECTED_ROW_COUNTS};
use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::mysql::MySqlConnection;
use sqlx::MySqlPool;
use tracing::info;

/// Row counts observed after a reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub menu_items: i64,
    pub menus: i64,
    pub employees: i64,
    pub bookings: i64,
    pub orders: i64,
}

impl ReconcileSummary {
    /// (table, count) pairs for display, in the fixture's table order
    pub fn as_pairs(&self) -> [(&'static str, i64); 5] {
        [
            ("MenuItems", self.menu_items),
            ("Menus", self.menus),
            ("Employees", self.employees),
            ("Bookings", self.bookings),
            ("Orders", self.orders),
        ]
    }

    /// Whether the observed counts match the seed fixture exactly
    pub fn matches_fixture(&self) -> bool {
        EXPECTED_ROW_COUNTS.iter().all(|(table, expected)| {
            self.as_pairs()
                .iter()
                .any(|(name, count)| name == table && count == expected)
        })
    }
}

/// Clear all five tables using the two-phase protocol.
///
/// `FOREIGN_KEY_CHECKS` is session-scoped, so every statement here runs on a
/// single pooled connection: disable checks, truncate the tables that exist
/// (children before parents), re-enable checks. Re-enabling is attempted even
/// when a truncate fails. Tables that have never been created are skipped so
/// the first run against a fresh server clears cleanly.
pub async fn clear_tables(pool: &MySqlPool) -> Result<()> {
    let mut conn = pool
        .acquire()
        .await
        .context("Failed to acquire connection for clearing")?;

    sqlx::query("SET FOREIGN_KEY_CHECKS = 0")
        .execute(&mut *conn)
        .await
        .context("Failed to disable foreign key checks")?;

    let outcome = truncate_existing(&mut conn).await;

    let restore = sqlx::query("SET FOREIGN_KEY_CHECKS = 1")
        .execute(&mut *conn)
        .await
        .context("Failed to re-enable foreign key checks");

    outcome?;
    restore?;

    info!("Existing data cleared");
    Ok(())
}

async fn truncate_existing(conn: &mut MySqlConnection) -> Result<()> {
    // Reverse creation order: children before parents
    for (name, _) in CREATE_ORDER.iter().rev() {
        let exists: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name = ?",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
        .with_context(|| format!("Failed to check existence of table {}", name))?;

        if exists > 0 {
            // Table names come from a compile-time list, never user input
            sqlx::query(&format!("TRUNCATE TABLE {}", name))
                .execute(&mut *conn)
                .await
                .with_context(|| format!("Failed to truncate table {}", name))?;
        }
    }
    Ok(())
}

/// Read the current per-table row counts
pub async fn table_counts(pool: &MySqlPool) -> Result<ReconcileSummary> {
    async fn count(pool: &MySqlPool, table: &str) -> Result<i64> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .with_context(|| format!("Failed to count rows in {}", table))
    }

    Ok(ReconcileSummary {
        menu_items: count(pool, "MenuItems").await?,
        menus: count(pool, "Menus").await?,
        employees: count(pool, "Employees").await?,
        bookings: count(pool, "Bookings").await?,
        orders: count(pool, "Orders").await?,
    })
}

/// Reconcile an already-connected database: clear, create, seed, verify.
///
/// The seed inserts run in one transaction, committed only if every statement
/// succeeds; on failure the transaction rolls back on drop. MySQL auto-commits
/// around DDL, so the table-creation steps rely on `IF NOT EXISTS` idempotence
/// rather than the transaction.
pub async fn reconcile(db: &Database) -> Result<ReconcileSummary> {
    clear_tables(db.pool()).await?;
    schema::create_tables(db.pool()).await?;

    let mut tx = db
        .pool()
        .begin()
        .await
        .context("Failed to begin seed transaction")?;
    seed::seed_tables(&mut tx).await?;
    tx.commit().await.context("Failed to commit seed data")?;

    let summary = table_counts(db.pool()).await?;
    info!(
        menu_items = summary.menu_items,
        menus = summary.menus,
        employees = summary.employees,
        bookings = summary.bookings,
        orders = summary.orders,
        "Database reconciled"
    );
    Ok(summary)
}

/// Top-level entry point: connect (creating the database if absent), run the
/// full reconciliation, and release the pool on success and failure alike.
pub async fn run(config: &DatabaseConfig) -> Result<ReconcileSummary> {
    let db = Database::create_and_connect(config).await?;
    let outcome = reconcile(&db).await;
    db.close().await;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_summary() -> ReconcileSummary {
        ReconcileSummary {
            menu_items: 14,
            menus: 12,
            employees: 6,
            bookings: 6,
            orders: 5,
        }
    }

    #[test]
    fn test_summary_matches_fixture() {
        assert!(fixture_summary().matches_fixture());
    }

    #[test]
    fn test_summary_detects_missing_rows() {
        let mut summary = fixture_summary();
        summary.orders = 0;
        assert!(!summary.matches_fixture());
    }

    #[test]
    fn test_summary_pairs_cover_all_tables() {
        let pairs = fixture_summary().as_pairs();
        assert_eq!(pairs[0].0, "MenuItems");
        assert_eq!(pairs[1].0, "Menus");
        assert_eq!(pairs[4].0, "Orders");
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let json = serde_json::to_value(fixture_summary()).unwrap();
        assert_eq!(json["menu_items"], 14);
        assert_eq!(json["orders"], 5);
    }
}
