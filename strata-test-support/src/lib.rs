//! Shared test utilities used across strata crates.

pub mod ci;
pub mod tracing;
