use thiserror::Error;

/// Errors for app logic (use cases, commands).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Batch size must be positive")]
    InvalidBatchSize,
}
