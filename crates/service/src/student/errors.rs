use thiserror::Error;

/// Business errors for student workflows
#[derive(Debug, Error)]
pub enum StudentError {
    #[error("student {0} not found")]
    NotFound(i64),
    #[error("repository error: {0}")]
    Repository(String),
}
