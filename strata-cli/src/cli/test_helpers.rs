//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary input tables and assert error handling
//! behaviour. These helpers keep the test cases concise and consistent.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

use super::{
    Cli, CliError, ColumnArgs, CommandOutput, DelimitedArgs, ExecutionSummary, InputSource,
    OrderArgs, OrderCheckMode, ParquetArgs, run_cli,
};

pub(super) const EXAMPLE_TABLE: &str = "a,b,w\nA,B,5\nC,D,5\nA,C,3\nE,F,1\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
    rows: &[(&str, &str, f64)],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("source", DataType::Utf8, false),
        Field::new("target", DataType::Utf8, false),
        Field::new("strength", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|row| row.0))) as ArrayRef,
            Arc::new(StringArray::from_iter_values(rows.iter().map(|row| row.1))) as ArrayRef,
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|row| row.2))) as ArrayRef,
        ],
    )?;
    let path = dir.path().join(name);
    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

pub(super) fn default_columns() -> ColumnArgs {
    ColumnArgs {
        a_column: "a".into(),
        b_column: "b".into(),
        weight_column: "w".into(),
    }
}

pub(super) fn order(order_check: OrderCheckMode, sort: bool) -> OrderArgs {
    OrderArgs {
        order_check,
        check_window: 100,
        sort,
    }
}

pub(super) fn delimited_source(path: PathBuf) -> InputSource {
    InputSource::Delimited(DelimitedArgs {
        path,
        delimiter: ',',
        columns: default_columns(),
        name: None,
    })
}

pub(super) fn parquet_source(path: PathBuf, name: Option<&str>) -> InputSource {
    InputSource::Parquet(ParquetArgs {
        path,
        columns: ColumnArgs {
            a_column: "source".into(),
            b_column: "target".into(),
            weight_column: "strength".into(),
        },
        name: name.map(ToOwned::to_owned),
    })
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn expect_run(summary: ExecutionSummary) -> strata_core::SubgraphStructure {
    match summary.output {
        CommandOutput::Run(structure) => structure,
        other => panic!("expected run output, got {other:?}"),
    }
}
