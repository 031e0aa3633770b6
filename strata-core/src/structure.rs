//! Output of a [`crate::Strata::run`] invocation.
//!
//! Bundles the step table, the merge log, optional membership snapshots and
//! the early-exit marker into a single [`SubgraphStructure`].

use crate::{
    membership::MembershipTable,
    partition::ComponentId,
    step::{ComponentDetail, Step, StepSummary},
};

/// One recorded merge of two components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergeEvent {
    /// One-based step during which the merge happened.
    pub step: usize,
    /// Zero-based source position of the bridging edge.
    pub edge_index: usize,
    /// Surviving component.
    pub receiver: ComponentId,
    /// Retired component.
    pub donor: ComponentId,
    /// Receiver size before the merge.
    pub receiver_size: usize,
    /// Donor size before the merge.
    pub donor_size: usize,
}

/// Marker recorded when membership tracking stopped before the input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EarlyExit {
    /// Last step that was emitted.
    pub step: usize,
    /// Edges folded before stopping.
    pub edges_processed: usize,
    /// Edges left unread.
    pub edges_skipped: usize,
}

/// Step-by-step structure of a weighted association graph.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, StrataBuilder};
///
/// let edges = EdgeList::new("demo", [("a", "b", 2.0), ("c", "d", 2.0), ("b", "c", 1.0)]);
/// let structure = StrataBuilder::new().build()?.run(&edges)?;
/// assert_eq!(structure.steps().len(), 2);
/// assert_eq!(structure.merges().len(), 1);
/// assert_eq!(structure.summaries().last().map(|row| row.max_size), Some(4));
/// # Ok::<(), strata_core::StrataError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubgraphStructure {
    data_source: String,
    steps: Vec<Step>,
    merges: Vec<MergeEvent>,
    membership: Option<MembershipTable>,
    early_exit: Option<EarlyExit>,
    edges_processed: usize,
    self_loops: usize,
}

impl SubgraphStructure {
    pub(crate) fn new(
        data_source: &str,
        steps: Vec<Step>,
        merges: Vec<MergeEvent>,
        membership: Option<MembershipTable>,
        early_exit: Option<EarlyExit>,
        self_loops: usize,
    ) -> Self {
        let edges_processed = early_exit.map_or_else(
            || steps.last().map_or(0, |step| step.summary.n_edges),
            |exit| exit.edges_processed,
        );
        Self {
            data_source: data_source.to_owned(),
            steps,
            merges,
            membership,
            early_exit,
            edges_processed,
            self_loops,
        }
    }

    /// Returns the name of the edge source that was analysed.
    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Returns every emitted step in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Iterates over the step table rows.
    pub fn summaries(&self) -> impl Iterator<Item = &StepSummary> {
        self.steps.iter().map(|step| &step.summary)
    }

    /// Returns the component rows for the one-based `step`, if it was emitted.
    #[must_use]
    pub fn components(&self, step: usize) -> Option<&[ComponentDetail]> {
        let position = step.checked_sub(1)?;
        self.steps
            .get(position)
            .map(|row| row.components.as_slice())
    }

    /// Returns the merge log in processing order.
    #[must_use]
    pub fn merges(&self) -> &[MergeEvent] {
        &self.merges
    }

    /// Returns the membership table when membership tracking was enabled.
    #[must_use]
    pub fn membership(&self) -> Option<&MembershipTable> {
        self.membership.as_ref()
    }

    /// Returns the early-exit marker when processing stopped before the end
    /// of the input.
    #[must_use]
    pub fn early_exit(&self) -> Option<EarlyExit> {
        self.early_exit
    }

    /// Returns how many edges were folded.
    #[rustfmt::skip]
    #[must_use]
    pub const fn edges_processed(&self) -> usize { self.edges_processed }

    /// Returns how many self-loops on unseen nodes were ignored.
    #[rustfmt::skip]
    #[must_use]
    pub const fn self_loops(&self) -> usize { self.self_loops }
}
