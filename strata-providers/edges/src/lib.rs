//! Edge-list providers that load tabular association data into an
//! [`strata_core::EdgeSource`].
//!
//! Two endpoint columns and one weight column are selected by name from
//! either a Parquet file or a delimited text table with a header row.

mod columns;
mod delimited;
mod errors;
mod ingest;
mod provider;

pub use columns::EdgeColumns;
pub use errors::EdgeTableProviderError;
pub use provider::EdgeTableProvider;

#[cfg(test)]
mod tests;
