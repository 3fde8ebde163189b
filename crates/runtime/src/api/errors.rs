//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule rejections from `inventory-core` and repository failures so
//! clients can bubble them up with consistent context.
use inventory_core::{
    DigestError, ErrorSeverity, GameError, RegistryError, RemoteError, TransferError, UnpackError,
    UseError,
};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Use(#[from] UseError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Unpack(#[from] UnpackError),

    #[error(transparent)]
    Digest(#[from] DigestError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no saved hero named {0:?}")]
    HeroNotFound(String),
}

impl RuntimeError {
    /// Severity of the underlying rule error, if this came from the rules.
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Transfer(e) => Some(e.severity()),
            Self::Use(e) => Some(e.severity()),
            Self::Remote(e) => Some(e.severity()),
            Self::Registry(e) => Some(e.severity()),
            Self::Unpack(e) => Some(e.severity()),
            Self::Digest(e) => Some(e.severity()),
            Self::Repository(_) | Self::HeroNotFound(_) => None,
        }
    }
}
