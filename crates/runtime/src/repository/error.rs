use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Another thread panicked while holding the in-memory store.
    #[error("hero store lock poisoned")]
    LockPoisoned,

    #[error("hero file access failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("hero record could not be encoded or decoded: {0}")]
    Serialization(String),

    /// Hero names become file names, so only a safe subset is accepted.
    #[error("hero name {0:?} is not allowed")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
