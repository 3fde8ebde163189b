use crate::error::{ErrorSeverity, GameError};
use crate::item::ItemId;

/// Lookup failure against the item catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// A save record or peer referenced a definition this catalog lacks.
    #[error("no item definition with id {}", .0.0)]
    ItemNotFound(ItemId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Catalog mismatch between peers or versions; not repairable locally.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "CATALOG_ITEM_NOT_FOUND"
    }
}
