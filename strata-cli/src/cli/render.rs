//! Human and JSON rendering of [`ExecutionSummary`] values.

use std::io::{self, Write};

use strata_core::SubgraphStructure;

use super::commands::{CommandOutput, CoverageReport, ExecutionSummary, OutputFormat, PartitionReport};

/// Renders `summary` to `writer` in the requested format.
///
/// Human output is a set of tab-separated tables; JSON output is a single
/// pretty-printed document tagged with the command name.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use strata_cli::cli::{
/// #     CommandOutput, CoverageReport, ExecutionSummary, OutputFormat, render_summary,
/// # };
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     output: CommandOutput::Coverage(CoverageReport {
///         nodes: 3,
///         edges: Some(2),
///         total_edges: 4,
///     }),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, OutputFormat::Human, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo\nnodes: 3\nedges: 2 of 4\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(
    summary: &ExecutionSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut writer, summary)?;
        return writeln!(writer);
    }

    writeln!(writer, "data source: {}", summary.data_source)?;
    match &summary.output {
        CommandOutput::Run(structure) => render_structure(structure, &mut writer),
        CommandOutput::Coverage(report) => render_coverage(report, &mut writer),
        CommandOutput::Partition(report) => render_partition(report, &mut writer),
    }
}

fn render_structure(structure: &SubgraphStructure, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "steps: {}", structure.steps().len())?;
    writeln!(writer, "edges processed: {}", structure.edges_processed())?;
    if structure.self_loops() > 0 {
        writeln!(writer, "self-loops ignored: {}", structure.self_loops())?;
    }
    if let Some(exit) = structure.early_exit() {
        writeln!(
            writer,
            "stopped early after step {} ({} edges skipped)",
            exit.step, exit.edges_skipped
        )?;
    }

    writeln!(
        writer,
        "step\tn_edges\tstrength\tnodes_seen\tnum_components\tn_triples\tmax_size\trel_max_size\tavg_size\tavg_density"
    )?;
    for row in structure.summaries() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}",
            row.step,
            row.n_edges,
            row.strength,
            row.nodes_seen,
            row.num_components,
            row.n_triples,
            row.max_size,
            row.rel_max_size,
            row.avg_size,
            row.avg_density,
        )?;
    }

    writeln!(writer, "components:")?;
    writeln!(
        writer,
        "step\tcomponent_id\tsize\tedge_count\tdensity\tmean_weight\tfirst_edge_index"
    )?;
    for step in structure.steps() {
        for detail in &step.components {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{}",
                step.summary.step,
                detail.component_id.get(),
                detail.size,
                detail.edge_count,
                detail.density,
                detail.mean_weight,
                detail.first_edge_index,
            )?;
        }
    }

    if !structure.merges().is_empty() {
        writeln!(writer, "merges:")?;
        writeln!(writer, "step\tedge_index\treceiver\tdonor\treceiver_size\tdonor_size")?;
        for merge in structure.merges() {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                merge.step,
                merge.edge_index,
                merge.receiver.get(),
                merge.donor.get(),
                merge.receiver_size,
                merge.donor_size,
            )?;
        }
    }

    if let Some(table) = structure.membership() {
        writeln!(writer, "membership:")?;
        write!(writer, "step")?;
        for node in table.legend().nodes() {
            write!(writer, "\t{node}")?;
        }
        writeln!(writer)?;
        for snapshot in table.snapshots() {
            write!(writer, "{}", snapshot.step())?;
            for label in snapshot.labels() {
                write!(writer, "\t{label}")?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn render_coverage(report: &CoverageReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "nodes: {}", report.nodes)?;
    match report.edges {
        Some(edges) => writeln!(writer, "edges: {edges} of {}", report.total_edges),
        None => writeln!(
            writer,
            "edges: not reached ({} edges in total)",
            report.total_edges
        ),
    }
}

fn render_partition(report: &PartitionReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "edges replayed: {}", report.edges_replayed)?;
    writeln!(writer, "components: {}", report.components.len())?;
    writeln!(writer, "component_id\tsize\tedge_count\ttotal_weight\tmembers\tedges")?;
    for row in &report.components {
        let edges: Vec<String> = row.edge_indices.iter().map(ToString::to_string).collect();
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.component_id,
            row.size,
            row.edge_count,
            row.total_weight,
            row.members.join(","),
            edges.join(","),
        )?;
    }
    if !report.unassigned_edges.is_empty() {
        let edges: Vec<String> = report
            .unassigned_edges
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(writer, "unassigned self-loops: {}", edges.join(","))?;
    }
    Ok(())
}
