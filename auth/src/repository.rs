use std::sync::Arc;

use store::{ColumnType, DEFAULT_LIMIT, KeyedStore, Row, StoreError, Value};

use crate::model::SessionCredential;
use crate::util;

/// Default credential table name.
pub const TABLE_NAME: &str = "auth";

/// Domain layer over the generic store: one row per browser identity.
///
/// The store is injected at construction and owned by the caller, so tests
/// can substitute it freely. One repository drives one flow at a time; the
/// underlying check-then-act writes are not safe against concurrent flows.
pub struct CredentialRepository<S: KeyedStore> {
    store: Arc<S>,
    table_name: String,
    table_limit: u32,
}

impl<S: KeyedStore> CredentialRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_table(store, TABLE_NAME, DEFAULT_LIMIT)
    }

    pub fn with_table(store: Arc<S>, table_name: impl Into<String>, table_limit: u32) -> Self {
        Self {
            store,
            table_name: table_name.into(),
            table_limit,
        }
    }

    /// Idempotently create the credential table.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let schema = [
            ("created_at", ColumnType::Date),
            ("updated_at", ColumnType::Date),
            ("fingerprint", ColumnType::Text),
            ("cookie_jar", ColumnType::Text),
        ];

        self.store.create_table(&self.table_name, &schema).await
    }

    async fn fetch_page(&self) -> Result<Vec<Row>, StoreError> {
        self.store
            .select(&self.table_name, None, self.table_limit)
            .await
    }

    /// First valid credential in store insertion order. First valid wins;
    /// recency of use plays no part in the choice.
    pub async fn best_valid_credential(&self) -> Result<Option<SessionCredential>, StoreError> {
        let rows = self.fetch_page().await?;

        Ok(rows
            .iter()
            .filter_map(SessionCredential::from_row)
            .find(|cred| cred.is_valid()))
    }

    /// Whether a fingerprint appears within the fetch window. A row past the
    /// first `table_limit` rows is treated as absent; the scan window is an
    /// accepted limitation, not a full-table guarantee.
    pub async fn exists(&self, fingerprint: &str) -> Result<bool, StoreError> {
        let rows = self.fetch_page().await?;

        Ok(rows
            .iter()
            .filter_map(SessionCredential::from_row)
            .any(|cred| cred.fingerprint == fingerprint))
    }

    /// Persist a live identity, keyed by fingerprint. Empty input is a
    /// no-op. `created_at` is written only when the insert branch runs; a
    /// refresh rewrites the jar and `updated_at` and nothing else.
    pub async fn save(&self, fingerprint: &str, cookie_jar: &str) -> Result<(), StoreError> {
        if fingerprint.is_empty() || cookie_jar.is_empty() {
            tracing::debug!("incomplete credential, nothing to save");
            return Ok(());
        }

        let now = util::current_timestamp();

        let data = [
            ("fingerprint", Value::from(fingerprint)),
            ("cookie_jar", Value::from(cookie_jar)),
            ("updated_at", Value::from(now.clone())),
        ];
        let predicate = [("fingerprint", Value::from(fingerprint))];
        let insert_only = [("created_at", Value::from(now))];

        self.store
            .upsert(&self.table_name, &data, &predicate, &insert_only)
            .await
    }
}
