//! Command-line interface orchestration for strata.
//!
//! Offers `run` for the full step table, `coverage` for the prefix length that
//! touches a node target and `partition` for the state after a fixed number of
//! edges. Every command reads either a Parquet file or a delimited text table.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, ColumnArgs, Command, CommandOutput, CoverageCommand, CoverageReport,
    DelimitedArgs, ExecutionSummary, InputSource, OrderArgs, OrderCheckMode, OutputFormat,
    ParquetArgs, PartitionCommand, PartitionReport, PartitionRow, RunCommand, run_cli,
};
pub use render::render_summary;

#[cfg(test)]
mod test_helpers;
