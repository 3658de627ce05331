use thiserror::Error;

/// Errors for db stuff.
///
/// The NotFound variants are lookup failures; everything else is
/// infrastructure (lost connection, lock wait timeout, deadlock) and safe to
/// retry, since the transaction never committed.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Player with ID {0} not found")]
    PlayerNotFound(i64),

    #[error("Player with name '{0}' not found")]
    PlayerByNameNotFound(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Transaction error: {0}")]
    Transaction(String),
}
