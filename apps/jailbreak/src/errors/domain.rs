//! Domain-level error type used across the orchestrators.
//!
//! Rejections are soft: by the time one is returned the affected player has
//! already been told why. Callers log them and carry on.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use jailbreak_api::PlayerId;

/// Why a player action was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RejectionKind {
    LastRequestActive,
    DayOnCooldown { rounds_left: u32 },
    DayActive,
    UnknownDay,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player(PlayerId),
    LastRequest,
    SpecialDay,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Business rule turned the action down; the player was notified
    Rejected(RejectionKind, String),
    /// Referenced player or definition does not exist
    NotFound(NotFoundKind, String),
    /// Malformed input
    Validation(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Rejected(kind, d) => write!(f, "rejected {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn rejected(kind: RejectionKind, detail: impl Into<String>) -> Self {
        Self::Rejected(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, DomainError::Rejected(..))
    }
}
