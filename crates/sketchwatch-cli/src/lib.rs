//! Command-line interface for the sketchwatch supply-chain auditor.

pub mod cli;

pub use cli::run;
