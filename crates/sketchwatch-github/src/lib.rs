//! Paginated, rate-limited GitHub commits client.
//!
//! This crate provides the [`GithubClient`] used to retrieve time-bounded
//! commit histories, plus the on-disk snapshot cache those histories land in.

mod client;
mod commits;
pub mod config;
pub mod snapshot;

pub use client::{GithubClient, GithubClientBuilder};
pub use config::{FetchLimits, RetryConfig};
pub use sketchwatch_core::{AuditError, Result};
