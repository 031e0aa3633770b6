//! Per-step node membership snapshots.
//!
//! The snapshotter fixes a [`NodeLegend`] over every node in the input before
//! processing starts, then records one label vector per step aligned to that
//! legend. Clustered nodes carry their component id; unseen nodes carry a
//! distinct negative placeholder (`-1`, `-2`, … in legend order, restarting
//! every step) so they are never confused with one another or with a real
//! component.

use std::{collections::HashSet, sync::Arc};

use crate::{
    error::Result,
    partition::Partition,
    source::{EdgeSource, wrap_source_error},
};

/// Fixed ordering of every distinct node id in an edge source.
///
/// Nodes are listed in first-appearance order over the first endpoint
/// column, followed by nodes that only appear in the second column.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, NodeLegend};
///
/// let edges = EdgeList::new("demo", [("a", "b", 2.0), ("c", "a", 1.0)]);
/// let legend = NodeLegend::from_source(&edges)?;
/// let names: Vec<&str> = legend.nodes().iter().map(AsRef::as_ref).collect();
/// assert_eq!(names, ["a", "c", "b"]);
/// # Ok::<(), strata_core::StrataError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct NodeLegend {
    nodes: Vec<Arc<str>>,
}

impl NodeLegend {
    /// Collects the distinct node ids of `source`.
    ///
    /// # Errors
    /// Returns [`crate::StrataError::EdgeSource`] when the source fails to
    /// yield an edge.
    pub fn from_source<S>(source: &S) -> Result<Self>
    where
        S: EdgeSource + ?Sized,
    {
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut nodes = Vec::new();
        for first_column in [true, false] {
            for index in 0..source.len() {
                let edge = source
                    .edge(index)
                    .map_err(|error| wrap_source_error(source, error))?;
                let node = if first_column { edge.a() } else { edge.b() };
                if !seen.contains(node) {
                    let owned: Arc<str> = Arc::from(node);
                    seen.insert(Arc::clone(&owned));
                    nodes.push(owned);
                }
            }
        }
        Ok(Self { nodes })
    }

    /// Returns the node ids in legend order.
    #[must_use]
    pub fn nodes(&self) -> &[Arc<str>] {
        &self.nodes
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the legend is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Membership labels for one step, aligned to a [`NodeLegend`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MembershipSnapshot {
    step: usize,
    labels: Vec<i64>,
}

impl MembershipSnapshot {
    /// Returns the one-based step the snapshot was taken at.
    #[rustfmt::skip]
    #[must_use]
    pub const fn step(&self) -> usize { self.step }

    /// Returns one label per legend entry; negative labels mark unseen nodes.
    #[must_use]
    pub fn labels(&self) -> &[i64] {
        &self.labels
    }
}

/// Every membership snapshot of a run plus the legend indexing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MembershipTable {
    legend: NodeLegend,
    snapshots: Vec<MembershipSnapshot>,
}

impl MembershipTable {
    /// Returns the legend shared by every snapshot.
    #[must_use]
    pub fn legend(&self) -> &NodeLegend {
        &self.legend
    }

    /// Returns the snapshots in step order.
    #[must_use]
    pub fn snapshots(&self) -> &[MembershipSnapshot] {
        &self.snapshots
    }
}

/// Records membership vectors at step boundaries.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, EdgeSource, MembershipSnapshotter, NodeLegend, Partition, apply_edge};
///
/// let edges = EdgeList::new("demo", [("a", "b", 2.0), ("c", "d", 1.0)]);
/// let mut snapshotter = MembershipSnapshotter::new(NodeLegend::from_source(&edges)?);
/// let mut partition = Partition::new();
/// apply_edge(&mut partition, edges.edge(0)?)?;
/// snapshotter.capture(&partition, 1);
///
/// let table = snapshotter.finish();
/// assert_eq!(table.snapshots()[0].labels(), [1, -1, 1, -2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct MembershipSnapshotter {
    legend: NodeLegend,
    snapshots: Vec<MembershipSnapshot>,
}

impl MembershipSnapshotter {
    /// Creates a snapshotter over a fixed legend.
    #[must_use]
    pub fn new(legend: NodeLegend) -> Self {
        Self {
            legend,
            snapshots: Vec::new(),
        }
    }

    /// Returns the legend the snapshots are aligned to.
    #[must_use]
    pub fn legend(&self) -> &NodeLegend {
        &self.legend
    }

    /// Appends the membership vector of `partition` for `step`.
    pub fn capture(&mut self, partition: &Partition, step: usize) {
        let mut placeholder: i64 = 0;
        let labels = self
            .legend
            .nodes()
            .iter()
            .map(|node| match partition.lookup(node) {
                Some(id) => i64::from(id.get()),
                None => {
                    placeholder -= 1;
                    placeholder
                }
            })
            .collect();
        self.snapshots.push(MembershipSnapshot { step, labels });
    }

    /// Returns whether membership can no longer change: every legend node is
    /// seen and they all share one component.
    #[must_use]
    pub fn is_saturated(&self, partition: &Partition) -> bool {
        partition.nodes_seen() == self.legend.len() && partition.component_count() == 1
    }

    /// Consumes the snapshotter, yielding the recorded table.
    #[must_use]
    pub fn finish(self) -> MembershipTable {
        MembershipTable {
            legend: self.legend,
            snapshots: self.snapshots,
        }
    }
}
