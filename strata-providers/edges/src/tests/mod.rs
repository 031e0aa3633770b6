pub(crate) use super::{EdgeColumns, EdgeTableProvider, EdgeTableProviderError};

mod parquet_input;
mod support;
