//! Core types and error taxonomy for the sketchwatch audit engine.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Types**: the [`Target`] audit unit, the [`CommitRecord`] snapshot
//!   shape, and the [`TargetReport`] risk-signal record
//! - **Errors**: the [`AuditError`] taxonomy with batch-fatal vs
//!   target-local classification
//! - **Catalog**: CSV target-catalog loading
//! - **Credentials**: `.env`-style token file parsing

pub mod catalog;
pub mod credentials;
mod error;
pub mod types;

pub use catalog::{load_targets, load_targets_from_reader};
pub use credentials::read_token;
pub use error::{AuditError, Result};
pub use types::*;
