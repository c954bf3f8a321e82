use thiserror::Error;

/// Store failures. The four validation variants are raised synchronously,
/// before any connection is acquired; `Database` wraps engine failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("table schema must declare at least one well-formed column")]
    InvalidSchema,

    #[error("predicate must contain at least one well-formed column")]
    InvalidPredicate,

    #[error("data must contain at least one well-formed column")]
    InvalidData,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
