//! Shared runtime plumbing: logging setup and filesystem checks.

pub mod env;
pub mod utils;
