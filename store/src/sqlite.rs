//! SQLite implementation of the keyed store.
//!
//! Every operation acquires a pooled connection, runs one statement (or a
//! guard check followed by one statement) and releases the connection before
//! returning; nothing is held across calls and no operation opens a
//! cross-statement transaction.
//!
//! Identifiers (table and column names) are validated and then interpolated
//! into the statement text; values always travel as bind parameters.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row as _, SqlitePool, TypeInfo, ValueRef};

use crate::KeyedStore;
use crate::error::StoreError;
use crate::schema::{ColumnType, Row, Value, is_identifier};

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>;

/// SQLite-backed keyed store over a connection pool.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a database URL (e.g. `sqlite://bot.db?mode=rwc`).
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(url).await?;
        Ok(Self { pool })
    }
}

fn check_table(table: &str) -> Result<(), StoreError> {
    if is_identifier(table) {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(table.to_string()))
    }
}

/// Reject empty column lists and malformed column names up front, before any
/// connection is touched. The caller supplies the error matching the
/// argument being validated.
fn check_values(items: &[(&str, Value)], on_invalid: StoreError) -> Result<(), StoreError> {
    if items.is_empty() || items.iter().any(|(name, _)| !is_identifier(name)) {
        return Err(on_invalid);
    }
    Ok(())
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &'q Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Integer(i) => query.bind(*i),
        Value::Text(s) => query.bind(s.as_str()),
    }
}

fn equality_clause(items: &[(&str, Value)], separator: &str) -> String {
    items
        .iter()
        .map(|(name, _)| format!("{name} = ?"))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Rows come back as ordered tuples: whatever SQLite reports as INTEGER
/// storage decodes to `Integer`, NULL to `Null`, everything else (TEXT and
/// DATE-affinity text) to `Text`.
fn decode_row(row: &SqliteRow) -> Result<Row, StoreError> {
    let mut values = Vec::with_capacity(row.columns().len());

    for idx in 0..row.columns().len() {
        let raw = row.try_get_raw(idx)?;

        let value = if raw.is_null() {
            Value::Null
        } else if raw.type_info().name() == "INTEGER" {
            Value::Integer(row.try_get(idx)?)
        } else {
            Value::Text(row.try_get(idx)?)
        };

        values.push(value);
    }

    Ok(values)
}

#[async_trait]
impl KeyedStore for SqliteStore {
    async fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        check_table(table)?;

        let found = sqlx::query(
            r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table' AND name = ?
        "#,
        )
        .bind(table)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    async fn create_table(
        &self,
        table: &str,
        schema: &[(&str, ColumnType)],
    ) -> Result<(), StoreError> {
        check_table(table)?;
        if schema.is_empty() || schema.iter().any(|(name, _)| !is_identifier(name)) {
            return Err(StoreError::InvalidSchema);
        }

        let columns = schema
            .iter()
            .map(|(name, ty)| format!("{name} {ty}"))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {table} (id INTEGER PRIMARY KEY, {columns})"
        );
        sqlx::query(&sql).execute(&self.pool).await?;

        Ok(())
    }

    async fn drop_table(&self, table: &str) -> Result<(), StoreError> {
        check_table(table)?;

        let sql = format!("DROP TABLE IF EXISTS {table}");
        sqlx::query(&sql).execute(&self.pool).await?;

        Ok(())
    }

    async fn record_exists(
        &self,
        table: &str,
        predicate: &[(&str, Value)],
    ) -> Result<bool, StoreError> {
        check_table(table)?;
        check_values(predicate, StoreError::InvalidPredicate)?;

        let clause = equality_clause(predicate, " AND ");
        let sql = format!("SELECT id FROM {table} WHERE {clause} LIMIT 1");

        let mut query = sqlx::query(&sql);
        for (_, value) in predicate {
            query = bind_value(query, value);
        }

        Ok(query.fetch_optional(&self.pool).await?.is_some())
    }

    async fn insert(&self, table: &str, record: &[(&str, Value)]) -> Result<(), StoreError> {
        check_table(table)?;
        check_values(record, StoreError::InvalidData)?;

        // De-duplication guard: identical full row already present -> skip.
        if self.record_exists(table, record).await? {
            tracing::debug!(table, "insert skipped, identical record present");
            return Ok(());
        }

        let columns = record
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; record.len()].join(", ");
        let sql = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");

        let mut query = sqlx::query(&sql);
        for (_, value) in record {
            query = bind_value(query, value);
        }
        query.execute(&self.pool).await?;

        Ok(())
    }

    async fn select(
        &self,
        table: &str,
        predicate: Option<&[(&str, Value)]>,
        limit: u32,
    ) -> Result<Vec<Row>, StoreError> {
        check_table(table)?;
        if let Some(p) = predicate {
            check_values(p, StoreError::InvalidPredicate)?;
        }

        let sql = match predicate {
            Some(p) => format!(
                "SELECT * FROM {table} WHERE {} LIMIT ?",
                equality_clause(p, " AND ")
            ),
            None => format!("SELECT * FROM {table} LIMIT ?"),
        };

        let mut query = sqlx::query(&sql);
        if let Some(p) = predicate {
            for (_, value) in p {
                query = bind_value(query, value);
            }
        }
        query = query.bind(i64::from(limit));

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn update(
        &self,
        table: &str,
        data: &[(&str, Value)],
        predicate: &[(&str, Value)],
    ) -> Result<(), StoreError> {
        check_table(table)?;
        check_values(data, StoreError::InvalidData)?;
        check_values(predicate, StoreError::InvalidPredicate)?;

        let sql = format!(
            "UPDATE {table} SET {} WHERE {}",
            equality_clause(data, ", "),
            equality_clause(predicate, " AND ")
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in data.iter().chain(predicate) {
            query = bind_value(query, value);
        }
        query.execute(&self.pool).await?;

        Ok(())
    }

    async fn delete_all(&self, table: &str) -> Result<(), StoreError> {
        check_table(table)?;

        let sql = format!("DELETE FROM {table}");
        sqlx::query(&sql).execute(&self.pool).await?;

        Ok(())
    }

    async fn upsert(
        &self,
        table: &str,
        data: &[(&str, Value)],
        predicate: &[(&str, Value)],
        insert_only: &[(&str, Value)],
    ) -> Result<(), StoreError> {
        check_table(table)?;
        check_values(data, StoreError::InvalidData)?;
        check_values(predicate, StoreError::InvalidPredicate)?;

        // Branch 1: the exact target data already exists.
        if self.record_exists(table, data).await? {
            tracing::debug!(table, "upsert skipped, target data already present");
            return Ok(());
        }

        // Branch 2: a row matches the key predicate -> rewrite it in place.
        if !self.select(table, Some(predicate), 1).await?.is_empty() {
            tracing::debug!(table, "upsert updating existing row");
            return self.update(table, data, predicate).await;
        }

        // Branch 3: first sighting -> insert, carrying the creation-only
        // columns that must never be rewritten afterwards.
        tracing::debug!(table, "upsert inserting new row");
        let mut record = data.to_vec();
        record.extend_from_slice(insert_only);
        self.insert(table, &record).await
    }
}
