//! Command implementations.

pub mod fetch_commits;
pub mod find_untrusted;
pub mod full_run;
