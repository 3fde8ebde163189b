//! Error classification shared by every inventory operation.
//!
//! Each operation family keeps its own error enum next to its code
//! ([`TransferError`](crate::cursor::TransferError),
//! [`UseError`](crate::consume::UseError),
//! [`UnpackError`](crate::persist::UnpackError) and so on). They implement
//! [`GameError`] so callers can log and route failures without matching on
//! every variant.
//!
//! An `Err` from any operation guarantees the player state is unchanged.

/// How a caller should react to a failed inventory request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was well formed but cannot happen right now, for example
    /// a full backpack or a player in the middle of an attack.
    Recoverable,

    /// The request breaks an item rule: wrong slot class, unmet stat
    /// requirements, a two-hander next to a shield.
    Validation,

    /// Player state contradicts itself. Points at a bug rather than bad input.
    Internal,

    /// Incoming data (a save record or a peer message) cannot be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every error enum in this crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable upper-case identifier, e.g. `TRANSFER_SLOT_MISMATCH`.
    ///
    /// Falls back to the Rust type name for errors that do not override it.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_displays_lowercase_name() {
        assert_eq!(ErrorSeverity::Recoverable.to_string(), "recoverable");
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
