//! Core orchestration for the Strata library.
//!
//! Provides the [`Strata`] runtime entry point, which folds a
//! strength-descending edge source into a [`Partition`] and captures the
//! step table, merge log and membership snapshots along the way.

use std::sync::Arc;

use tracing::{debug, info, instrument, trace};

use crate::{
    Result,
    engine::{Transition, apply_edge},
    error::StrataError,
    membership::{MembershipSnapshotter, NodeLegend},
    partition::Partition,
    snapshot::{PartitionSnapshot, replay_prefix},
    source::{EdgeRef, EdgeSource, OrderCheck, ensure_finite, verify_order, wrap_source_error},
    step::{closes_step, summarise_step},
    structure::{EarlyExit, MergeEvent, SubgraphStructure},
};

/// Entry point for analysing a weighted association graph.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, StrataBuilder};
///
/// let edges = EdgeList::new(
///     "example",
///     [("A", "B", 5.0), ("C", "D", 5.0), ("A", "C", 3.0), ("E", "F", 1.0)],
/// );
/// let structure = StrataBuilder::new().build()?.run(&edges)?;
/// let rows: Vec<(usize, usize, usize)> = structure
///     .summaries()
///     .map(|row| (row.n_edges, row.nodes_seen, row.num_components))
///     .collect();
/// assert_eq!(rows, [(2, 4, 2), (3, 4, 1), (4, 6, 2)]);
/// # Ok::<(), strata_core::StrataError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Strata {
    membership: bool,
    order_check: OrderCheck,
}

impl Strata {
    pub(crate) const fn new(membership: bool, order_check: OrderCheck) -> Self {
        Self {
            membership,
            order_check,
        }
    }

    /// Returns whether membership snapshots are captured.
    #[must_use]
    pub const fn membership(&self) -> bool {
        self.membership
    }

    /// Returns the ordering check applied before processing.
    #[must_use]
    pub const fn order_check(&self) -> OrderCheck {
        self.order_check
    }

    /// Folds every edge of `source` and reports the structure after each
    /// step.
    ///
    /// An empty source yields an empty structure. With membership enabled
    /// the run stops at the first step boundary after which every node of
    /// the input shares one component; the remaining edges are counted in
    /// [`SubgraphStructure::early_exit`].
    ///
    /// # Errors
    /// Returns [`StrataError::TooManyEdges`] when component ids could
    /// overflow, [`StrataError::UnsortedWeights`] when the ordering check
    /// fails, [`StrataError::NonFiniteWeight`] for NaN or infinite weights and
    /// [`StrataError::EdgeSource`] when the source fails to yield an edge.
    #[instrument(
        name = "core.run",
        err,
        skip(self, source),
        fields(
            data_source = %source.name(),
            edges = source.len(),
            membership = self.membership,
            order_check = ?self.order_check
        ),
    )]
    pub fn run<S>(&self, source: &S) -> Result<SubgraphStructure>
    where
        S: EdgeSource + ?Sized,
    {
        Self::check_capacity(source)?;
        verify_order(source, self.order_check)?;

        let mut snapshotter = if self.membership {
            Some(MembershipSnapshotter::new(NodeLegend::from_source(source)?))
        } else {
            None
        };
        let mut partition = Partition::new();
        let mut steps = Vec::new();
        let mut merges = Vec::new();
        let mut self_loops = 0;
        let mut early_exit = None;

        let mut position = 0;
        let mut pending = fetch(source, position)?;
        while let Some(edge) = pending {
            ensure_finite(source, position, edge.weight())?;
            let step = steps.len() + 1;
            match apply_edge(&mut partition, edge)? {
                Transition::Merged(outcome) => merges.push(MergeEvent {
                    step,
                    edge_index: position,
                    receiver: outcome.receiver(),
                    donor: outcome.donor(),
                    receiver_size: outcome.receiver_size(),
                    donor_size: outcome.donor_size(),
                }),
                Transition::SelfLoop => self_loops += 1,
                Transition::Created(_) | Transition::Extended(_) | Transition::Repeated(_) => {}
            }

            position += 1;
            pending = fetch(source, position)?;
            if !closes_step(edge.weight(), pending.map(|next| next.weight())) {
                continue;
            }

            let n_edges = position;
            steps.push(summarise_step(&partition, step, n_edges, edge.weight()));
            trace!(
                step,
                n_edges,
                strength = edge.weight(),
                components = partition.component_count(),
                "step closed"
            );
            if let Some(recorder) = snapshotter.as_mut() {
                recorder.capture(&partition, step);
                if pending.is_some() && recorder.is_saturated(&partition) {
                    let skipped = source.len() - n_edges;
                    info!(step, edges_skipped = skipped, "membership saturated, stopping early");
                    early_exit = Some(EarlyExit {
                        step,
                        edges_processed: n_edges,
                        edges_skipped: skipped,
                    });
                    break;
                }
            }
        }

        let structure = SubgraphStructure::new(
            source.name(),
            steps,
            merges,
            snapshotter.map(MembershipSnapshotter::finish),
            early_exit,
            self_loops,
        );
        record_metrics(&structure);
        info!(
            steps = structure.steps().len(),
            merges = structure.merges().len(),
            edges_processed = structure.edges_processed(),
            "structure analysis completed"
        );
        Ok(structure)
    }

    /// Replays the first `n_edges` edges of `source` and returns the
    /// resulting partition together with the component holding each edge.
    ///
    /// Requests beyond the end of the source replay every edge.
    ///
    /// # Errors
    /// Returns the same errors as [`Strata::run`].
    ///
    /// # Examples
    /// ```
    /// use strata_core::{EdgeList, StrataBuilder};
    ///
    /// let edges = EdgeList::new("demo", [("a", "b", 3.0), ("c", "d", 2.0), ("b", "c", 1.0)]);
    /// let strata = StrataBuilder::new().build()?;
    /// let snapshot = strata.partition_at(&edges, 2)?;
    /// assert_eq!(snapshot.partition().component_count(), 2);
    /// assert_ne!(snapshot.component_of("a"), snapshot.component_of("c"));
    /// # Ok::<(), strata_core::StrataError>(())
    /// ```
    #[instrument(
        name = "core.partition_at",
        err,
        skip(self, source),
        fields(data_source = %source.name(), n_edges = n_edges),
    )]
    pub fn partition_at<S>(&self, source: &S, n_edges: usize) -> Result<PartitionSnapshot>
    where
        S: EdgeSource + ?Sized,
    {
        Self::check_capacity(source)?;
        verify_order(source, self.order_check)?;
        let snapshot = replay_prefix(source, n_edges)?;
        debug!(
            replayed = snapshot.edges_replayed(),
            components = snapshot.partition().component_count(),
            "partition replayed"
        );
        Ok(snapshot)
    }

    fn check_capacity<S>(source: &S) -> Result<()>
    where
        S: EdgeSource + ?Sized,
    {
        let limit = usize::try_from(u32::MAX).unwrap_or(usize::MAX);
        if source.len() > limit {
            return Err(StrataError::TooManyEdges {
                data_source: Arc::from(source.name()),
                edges: source.len(),
                limit,
            });
        }
        Ok(())
    }
}

/// Reads the edge at `position`, or `None` past the end of the source.
///
/// The returned edge carries `position` as its index whatever the source
/// reported, so every fold counts edges by where it read them.
pub(crate) fn fetch<S>(source: &S, position: usize) -> Result<Option<EdgeRef<'_>>>
where
    S: EdgeSource + ?Sized,
{
    if position >= source.len() {
        return Ok(None);
    }
    let edge = source
        .edge(position)
        .map_err(|error| wrap_source_error(source, error))?;
    Ok(Some(EdgeRef::new(edge.a(), edge.b(), edge.weight(), position)))
}

#[cfg(feature = "metrics")]
fn record_metrics(structure: &SubgraphStructure) {
    let count = |value: usize| u64::try_from(value).unwrap_or(u64::MAX);
    metrics::counter!("strata_edges_processed").increment(count(structure.edges_processed()));
    metrics::counter!("strata_components_merged").increment(count(structure.merges().len()));
    metrics::counter!("strata_steps_emitted").increment(count(structure.steps().len()));
}

#[cfg(not(feature = "metrics"))]
fn record_metrics(_structure: &SubgraphStructure) {}
