//! Common library for the what-to-wear backend
//!
//! This crate provides the shared error handling used across the service:
//! the closed application error taxonomy, the canonical client-facing
//! message strings, and the translation of persistence and token faults
//! into typed errors.

pub mod error;
pub mod fault;
pub mod messages;

pub use error::{AppError, ErrorKind};
pub use fault::{FaultContext, StorageFault, TokenFault, translate_storage_fault, translate_token_fault};
