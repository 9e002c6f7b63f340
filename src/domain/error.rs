//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no discipline patterns found in model root names; expected identifiers like _ARCH_, _STRC_, _MEP_")]
    NoDisciplinesFound,

    #[error("discipline folder {0:?} not found; create discipline search sets first")]
    DisciplinesMissing(String),

    #[error("no element categories found in the discipline search sets")]
    NoCategorySetsFound,

    #[error("invalid group name {name:?}: {reason}")]
    InvalidGroupName { name: String, reason: String },

    #[error("invalid wildcard pattern {0:?}")]
    InvalidPattern(String),
}
