//! Error handling for the jailbreak core.

pub mod domain;

pub use domain::{DomainError, NotFoundKind, RejectionKind};
