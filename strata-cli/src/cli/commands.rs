//! Command implementations and argument parsing for the strata CLI.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use strata_core::{
    DEFAULT_ORDER_CHECK_WINDOW, EdgeSource, OrderCheck, PartitionSnapshot, Strata, StrataBuilder,
    StrataError, SubgraphStructure, edges_to_cover,
};
use strata_providers_edges::{EdgeColumns, EdgeTableProvider, EdgeTableProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "strata",
    about = "Trace how connected subgraphs form as association strength decreases."
)]
pub struct Cli {
    /// Output format written to stdout.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Fold every edge and report the structure after each strength step.
    Run(RunCommand),
    /// Report how many leading edges touch a number of distinct nodes.
    Coverage(CoverageCommand),
    /// Report the components formed by a fixed number of leading edges.
    Partition(PartitionCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Capture per-step membership labels and stop once every node is joined.
    #[arg(long)]
    pub membership: bool,

    /// Ordering options.
    #[command(flatten)]
    pub order: OrderArgs,

    /// Edge table to analyse.
    #[command(subcommand)]
    pub source: InputSource,
}

/// Options accepted by the `coverage` command.
#[derive(Debug, Args, Clone)]
pub struct CoverageCommand {
    /// Number of distinct nodes the prefix must touch.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub nodes: usize,

    /// Sort the table strongest first before counting.
    #[arg(long)]
    pub sort: bool,

    /// Edge table to analyse.
    #[command(subcommand)]
    pub source: InputSource,
}

/// Options accepted by the `partition` command.
#[derive(Debug, Args, Clone)]
pub struct PartitionCommand {
    /// Number of leading edges to replay.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub edges: usize,

    /// Ordering options.
    #[command(flatten)]
    pub order: OrderArgs,

    /// Edge table to analyse.
    #[command(subcommand)]
    pub source: InputSource,
}

/// Controls how the strength-descending precondition is handled.
#[derive(Debug, Args, Clone)]
pub struct OrderArgs {
    /// How much of the input is checked for descending weights.
    #[arg(long = "order-check", value_enum, default_value_t = OrderCheckMode::Prefix)]
    pub order_check: OrderCheckMode,

    /// Number of leading edges inspected by the prefix check.
    #[arg(
        long = "check-window",
        default_value_t = DEFAULT_ORDER_CHECK_WINDOW,
        value_parser = clap::value_parser!(usize),
    )]
    pub check_window: usize,

    /// Sort the table strongest first instead of trusting its order.
    #[arg(long)]
    pub sort: bool,
}

impl OrderArgs {
    fn order_check(&self) -> OrderCheck {
        match self.order_check {
            OrderCheckMode::Prefix => OrderCheck::Prefix(self.check_window),
            OrderCheckMode::Full => OrderCheck::Full,
            OrderCheckMode::Trust => OrderCheck::Trust,
        }
    }
}

/// Ordering checks selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderCheckMode {
    /// Check the first `--check-window` edges.
    Prefix,
    /// Check every edge.
    Full,
    /// Skip the check.
    Trust,
}

/// Output formats for rendered summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated tables.
    Human,
    /// A single pretty-printed JSON document.
    Json,
}

/// Input tables supported by every command.
#[derive(Debug, Subcommand, Clone)]
pub enum InputSource {
    /// Read a Parquet file.
    Parquet(ParquetArgs),
    /// Read a delimited text table with a header row.
    Delimited(DelimitedArgs),
}

/// Names of the endpoint and weight columns.
#[derive(Debug, Args, Clone)]
pub struct ColumnArgs {
    /// Column holding the first endpoint.
    #[arg(long = "a-column", default_value = "a")]
    pub a_column: String,

    /// Column holding the second endpoint.
    #[arg(long = "b-column", default_value = "b")]
    pub b_column: String,

    /// Column holding the association strength.
    #[arg(long = "weight-column", default_value = "w")]
    pub weight_column: String,
}

impl ColumnArgs {
    fn to_columns(&self) -> EdgeColumns {
        EdgeColumns::new(&self.a_column, &self.b_column, &self.weight_column)
    }
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file.
    pub path: PathBuf,

    /// Column selection.
    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Delimited text ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct DelimitedArgs {
    /// Path to the delimited text file.
    pub path: PathBuf,

    /// Field separator.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Column selection.
    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Edge table ingestion failed.
    #[error(transparent)]
    Provider(#[from] EdgeTableProviderError),
    /// Core analysis failed.
    #[error(transparent)]
    Core(#[from] StrataError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionSummary {
    /// Name reported by the edge source.
    pub data_source: String,
    /// Command-specific result.
    pub output: CommandOutput,
}

/// Result of one command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandOutput {
    /// Structure produced by `run`.
    Run(SubgraphStructure),
    /// Prefix length produced by `coverage`.
    Coverage(CoverageReport),
    /// Components produced by `partition`.
    Partition(PartitionReport),
}

/// Result of the `coverage` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Requested node count.
    pub nodes: usize,
    /// Leading edges needed, or `None` when the table covers fewer nodes.
    pub edges: Option<usize>,
    /// Edges in the table.
    pub total_edges: usize,
}

/// Result of the `partition` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionReport {
    /// Edges actually replayed.
    pub edges_replayed: usize,
    /// Live components in ascending id order.
    pub components: Vec<PartitionRow>,
    /// Positions of replayed self-loops that joined no component.
    pub unassigned_edges: Vec<usize>,
}

/// One component of a [`PartitionReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionRow {
    /// Component identifier.
    pub component_id: u32,
    /// Member count.
    pub size: usize,
    /// Absorbed edge count.
    pub edge_count: usize,
    /// Sum of absorbed weights.
    pub total_weight: f64,
    /// Member node ids in joining order.
    pub members: Vec<String>,
    /// Source positions of the edges now owned by the component.
    pub edge_indices: Vec<usize>,
}

impl PartitionReport {
    fn from_snapshot(snapshot: &PartitionSnapshot) -> Self {
        let components = snapshot
            .partition()
            .components()
            .map(|component| PartitionRow {
                component_id: component.id().get(),
                size: component.size(),
                edge_count: component.edge_count(),
                total_weight: component.total_weight(),
                members: component
                    .members()
                    .iter()
                    .map(|member| member.to_string())
                    .collect(),
                edge_indices: snapshot.edge_indices(component.id()).to_vec(),
            })
            .collect();
        let unassigned_edges = snapshot
            .edge_components()
            .iter()
            .enumerate()
            .filter_map(|(position, owner)| owner.is_none().then_some(position))
            .collect();
        Self {
            edges_replayed: snapshot.edges_replayed(),
            components,
            unassigned_edges,
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the input or analysing it fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use strata_cli::cli::{
/// #     Cli, ColumnArgs, Command, CommandOutput, DelimitedArgs, InputSource, OrderArgs,
/// #     OrderCheckMode, OutputFormat, RunCommand, run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "a,b,w\nx,y,2\ny,z,1\n")?;
/// let cli = Cli {
///     format: OutputFormat::Human,
///     command: Command::Run(RunCommand {
///         membership: false,
///         order: OrderArgs {
///             order_check: OrderCheckMode::Full,
///             check_window: 100,
///             sort: false,
///         },
///         source: InputSource::Delimited(DelimitedArgs {
///             path: file.path().to_path_buf(),
///             delimiter: ',',
///             columns: ColumnArgs {
///                 a_column: "a".into(),
///                 b_column: "b".into(),
///                 weight_column: "w".into(),
///             },
///             name: Some("demo".into()),
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let CommandOutput::Run(structure) = summary.output else {
///     panic!("run yields a structure");
/// };
/// assert_eq!(structure.steps().len(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_command(run)
        }
        Command::Coverage(coverage) => {
            span.record("command", field::display("coverage"));
            coverage_command(coverage)
        }
        Command::Partition(partition) => {
            span.record("command", field::display("partition"));
            partition_command(partition)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(membership = command.membership, order_check = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let strata = build_strata(command.membership, &command.order)?;
    let provider = load_source(command.source, command.order.sort)?;
    let structure = strata.run(&provider)?;
    info!(
        data_source = provider.name(),
        steps = structure.steps().len(),
        early_exit = structure.early_exit().is_some(),
        "run completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        output: CommandOutput::Run(structure),
    })
}

#[instrument(name = "cli.coverage", err, skip(command), fields(nodes = command.nodes))]
pub(super) fn coverage_command(command: CoverageCommand) -> Result<ExecutionSummary, CliError> {
    let provider = load_source(command.source, command.sort)?;
    let edges = edges_to_cover(&provider, command.nodes)?;
    info!(
        data_source = provider.name(),
        edges = field::debug(edges),
        "coverage completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        output: CommandOutput::Coverage(CoverageReport {
            nodes: command.nodes,
            edges,
            total_edges: provider.len(),
        }),
    })
}

#[instrument(
    name = "cli.partition",
    err,
    skip(command),
    fields(edges = command.edges, order_check = field::Empty),
)]
pub(super) fn partition_command(command: PartitionCommand) -> Result<ExecutionSummary, CliError> {
    let strata = build_strata(false, &command.order)?;
    let provider = load_source(command.source, command.order.sort)?;
    let snapshot = strata.partition_at(&provider, command.edges)?;
    let report = PartitionReport::from_snapshot(&snapshot);
    info!(
        data_source = provider.name(),
        components = report.components.len(),
        "partition completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        output: CommandOutput::Partition(report),
    })
}

fn build_strata(membership: bool, order: &OrderArgs) -> Result<Strata, CliError> {
    let check = if order.sort {
        OrderCheck::Trust
    } else {
        order.order_check()
    };
    Span::current().record("order_check", field::debug(check));
    Ok(StrataBuilder::new()
        .with_membership(membership)
        .with_order_check(check)
        .build()?)
}

#[instrument(
    name = "cli.load_source",
    err,
    skip(source),
    fields(format = field::Empty, path = field::Empty, override_name = field::Empty),
)]
pub(super) fn load_source(source: InputSource, sort: bool) -> Result<EdgeTableProvider, CliError> {
    let span = Span::current();
    let provider = match source {
        InputSource::Parquet(ParquetArgs {
            path,
            columns,
            name,
        }) => {
            span.record("format", field::display("parquet"));
            record_path(&span, &path, name.as_deref());
            let chosen_name = derive_data_source_name(&path, name.as_deref());
            let file = open_file(&path)?;
            EdgeTableProvider::try_from_parquet_reader(chosen_name, file, &columns.to_columns())?
        }
        InputSource::Delimited(DelimitedArgs {
            path,
            delimiter,
            columns,
            name,
        }) => {
            span.record("format", field::display("delimited"));
            record_path(&span, &path, name.as_deref());
            let chosen_name = derive_data_source_name(&path, name.as_deref());
            let reader = BufReader::new(open_file(&path)?);
            EdgeTableProvider::try_from_delimited(
                chosen_name,
                reader,
                delimiter,
                &columns.to_columns(),
            )?
        }
    };
    info!(
        data_source = provider.name(),
        edges = provider.len(),
        sorted = sort,
        "edge table loaded"
    );
    Ok(if sort {
        provider.sorted_by_strength()
    } else {
        provider
    })
}

fn record_path(span: &Span, path: &Path, name: Option<&str>) {
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.unwrap_or("<derived>")),
    );
}

pub(super) fn open_file(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}
