//! SQLite persistence adapter.
//!
//! Appends validated rows to per-dataset tables. No validation happens
//! here; callers are trusted to have run the validation pipeline first.
//! Each table's rows are appended independently, so a failure partway
//! through a multi-table save leaves earlier tables already committed.

use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;
use serde_json::Value;
use sheetvet::{PreviewRow, SchemaRegistry};
use sqlx::SqlitePool;
use thiserror::Error;

/// Failure surfaced from the underlying store.
#[derive(Debug, Error)]
#[error("Persistence error: {0}")]
pub struct PersistenceError(pub String);

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError(err.to_string())
    }
}

/// Initialize the database connection pool, creating the file if needed.
pub async fn init_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    Ok(pool)
}

/// Create the backing table for every sheet schema in the registry.
pub async fn init_tables(pool: &SqlitePool, registry: &SchemaRegistry) -> Result<()> {
    for sheet in registry.all_sheets() {
        let ddl = create_table_sql(&sheet.table_name, &column_ddl(&sheet.columns))?;
        sqlx::query(&ddl).execute(pool).await?;
    }

    tracing::info!("Database tables initialized");
    Ok(())
}

/// Append rows to an existing table.
///
/// Column sets may vary per row; each row inserts exactly the columns it
/// carries. JSON nulls become SQL NULLs.
pub async fn append_rows(
    pool: &SqlitePool,
    table: &str,
    rows: &[PreviewRow],
) -> Result<u64, PersistenceError> {
    let table = checked_identifier(table)?;
    let mut inserted = 0;

    for row in rows {
        if row.is_empty() {
            continue;
        }

        let mut columns = Vec::with_capacity(row.len());
        for name in row.keys() {
            columns.push(checked_identifier(name)?);
        }
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for value in row.values() {
            query = match value {
                Value::Null => query.bind(None::<String>),
                Value::Bool(b) => query.bind(*b),
                Value::Number(n) => query.bind(n.as_f64()),
                Value::String(s) => query.bind(s.clone()),
                other => query.bind(other.to_string()),
            };
        }

        query.execute(pool).await?;
        inserted += 1;
    }

    tracing::debug!("Appended {} rows to {}", inserted, table);
    Ok(inserted)
}

fn create_table_sql(
    table: &str,
    columns: &[(String, &'static str)],
) -> Result<String, PersistenceError> {
    let table = checked_identifier(table)?;
    let mut cols = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
    for (name, sql_type) in columns {
        cols.push(format!("{} {}", checked_identifier(name)?, sql_type));
    }
    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table,
        cols.join(", ")
    ))
}

fn column_ddl(columns: &IndexMap<String, sheetvet::ColumnType>) -> Vec<(String, &'static str)> {
    columns
        .iter()
        .map(|(name, ty)| (name.clone(), ty.sql_type()))
        .collect()
}

/// Identifiers are spliced into SQL text, so restrict them to a safe
/// character set.
fn checked_identifier(name: &str) -> Result<&str, PersistenceError> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(name)
    } else {
        Err(PersistenceError(format!("invalid identifier '{}'", name)))
    }
}
