//! Fault signals and their translation into typed errors
//!
//! Raw failures from external collaborators never reach the handlers
//! directly. The persistence adapter reduces driver-specific errors to the
//! closed `StorageFault` set, and the token service reduces verification
//! failures to the `TokenFault` set; the translation functions here map
//! both onto `AppError`. Translation is pure: no I/O and no logging.

use thiserror::Error;

use crate::error::AppError;
use crate::messages;

/// Closed set of fault signals from the persistence boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageFault {
    /// A document violated one or more schema constraints.
    #[error("constraint violation: {}", violations.join(", "))]
    Constraint { violations: Vec<String> },

    /// A lookup that expected exactly one document found none.
    #[error("document not found")]
    NotFound,

    /// An identifier could not be parsed into the document key format.
    #[error("malformed document key")]
    BadKey,

    /// A unique index rejected a duplicate value.
    #[error("unique index violation")]
    UniqueViolation,

    /// Anything the adapter could not classify. The detail is for logs
    /// only; it is never surfaced to the client.
    #[error("storage failure: {0}")]
    Unknown(String),
}

/// Closed set of fault signals from token verification.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenFault {
    #[error("authorization token missing")]
    Missing,
    #[error("authorization token malformed")]
    Malformed,
    #[error("authorization token signature invalid")]
    InvalidSignature,
    #[error("authorization token expired")]
    Expired,
}

/// Which resource a storage operation was acting on. Selects the
/// context-dependent phrasing for not-found and bad-id errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultContext {
    User,
    Item,
}

/// Map a storage fault to a typed error. Rules are checked in order; the
/// first match wins.
pub fn translate_storage_fault(fault: StorageFault, context: FaultContext) -> AppError {
    match fault {
        StorageFault::Constraint { violations } => AppError::validation(violations.join(", ")),
        StorageFault::NotFound => match context {
            FaultContext::User => AppError::not_found(messages::USER_NOT_FOUND),
            FaultContext::Item => AppError::not_found(messages::CLOTHING_ITEM_NOT_FOUND),
        },
        StorageFault::BadKey => match context {
            FaultContext::User => AppError::validation(messages::INVALID_USER_ID),
            FaultContext::Item => AppError::validation(messages::INVALID_ITEM_ID),
        },
        StorageFault::UniqueViolation => AppError::conflict(messages::EMAIL_ALREADY_EXISTS),
        StorageFault::Unknown(_) => AppError::internal(),
    }
}

/// Map a token fault to a typed error.
///
/// Every verification failure renders the same generic message: the client
/// is never told whether a token was expired, malformed, or absent.
pub fn translate_token_fault(fault: TokenFault) -> AppError {
    match fault {
        TokenFault::Missing
        | TokenFault::Malformed
        | TokenFault::InvalidSignature
        | TokenFault::Expired => AppError::unauthorized(messages::AUTHORIZATION_REQUIRED),
    }
}
