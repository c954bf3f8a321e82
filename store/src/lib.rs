//! Generic keyed persistence layer.
//!
//! Tables are declared at runtime as ordered lists of named, typed columns
//! with a leading surrogate `id` assigned by the engine. Callers never write
//! query text: every operation is parameterized by a table name, a schema or
//! a column/value list, and predicates are conjunctions of equality tests.
//!
//! All domain semantics live above this crate; nothing here knows what a
//! credential or a cookie jar is.

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::StoreError;
pub use schema::{ColumnType, Row, Value};

/// Default page size for `select` when the caller has no better bound.
pub const DEFAULT_LIMIT: u32 = 50;

/// Table-agnostic CRUD over named tables of named typed columns.
///
/// Write-path guards (`insert` de-duplication, the three-way `upsert`) are
/// check-then-act sequences over separate pooled connections and are NOT
/// atomic: two concurrent flows can race between the existence check and the
/// write, producing a duplicate row or a lost update. Single-flow use is the
/// operating assumption; if cross-process access ever becomes a requirement,
/// the guards should collapse into one conditional statement keyed by a
/// uniqueness constraint instead of two round trips.
#[async_trait::async_trait]
pub trait KeyedStore: Send + Sync {
    /// Whether a table with this name exists. Never fails for a well-formed
    /// name.
    async fn table_exists(&self, table: &str) -> Result<bool, StoreError>;

    /// Create a table with a leading `id INTEGER PRIMARY KEY` followed by
    /// `schema` in declaration order. Creating an existing table is a no-op.
    async fn create_table(
        &self,
        table: &str,
        schema: &[(&str, ColumnType)],
    ) -> Result<(), StoreError>;

    /// Drop a table. Dropping a non-existent table is a no-op.
    async fn drop_table(&self, table: &str) -> Result<(), StoreError>;

    /// Whether any row matches the predicate (equality on every listed
    /// column).
    async fn record_exists(
        &self,
        table: &str,
        predicate: &[(&str, Value)],
    ) -> Result<bool, StoreError>;

    /// Guarded insert: silently skips when a row with identical values in
    /// every listed column already exists. The skip is observable behavior
    /// (de-duplication), not an optimization.
    async fn insert(&self, table: &str, record: &[(&str, Value)]) -> Result<(), StoreError>;

    /// Fetch up to `limit` rows, each an ordered tuple of `id` followed by
    /// the columns in declaration order. `None` predicate means all rows;
    /// `Some(&[])` is invalid input.
    async fn select(
        &self,
        table: &str,
        predicate: Option<&[(&str, Value)]>,
        limit: u32,
    ) -> Result<Vec<Row>, StoreError>;

    /// Update every row matching the predicate. Values travel as bind
    /// parameters, so text and integer columns keep their types verbatim.
    async fn update(
        &self,
        table: &str,
        data: &[(&str, Value)],
        predicate: &[(&str, Value)],
    ) -> Result<(), StoreError>;

    /// Remove every row but keep the table and its id sequence state.
    async fn delete_all(&self, table: &str) -> Result<(), StoreError>;

    /// Insert-or-update:
    ///   1. a row fully matching `data` already exists -> no-op;
    ///   2. a row matches `predicate` -> update it with `data`;
    ///   3. otherwise insert `data` plus the `insert_only` columns.
    ///
    /// `insert_only` carries columns that must be written once at creation
    /// and never rewritten afterwards; pass `&[]` when there are none.
    async fn upsert(
        &self,
        table: &str,
        data: &[(&str, Value)],
        predicate: &[(&str, Value)],
        insert_only: &[(&str, Value)],
    ) -> Result<(), StoreError>;
}
