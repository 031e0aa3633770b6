//! Node index and component store for the incremental merge engine.
//!
//! A [`Partition`] is the whole mutable state of one run: every node seen so
//! far maps directly to the id of the component that currently owns it, and
//! every live component records its members and absorbed-edge statistics.
//! Merges follow the small-to-large rule, so a node's index entry is rewritten
//! at most `O(log N)` times over a run without any parent chains.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
};

use thiserror::Error;

/// Identifier assigned to a component.
///
/// Identifiers start at `1`, grow monotonically, and are never reused.
///
/// # Examples
/// ```
/// use strata_core::ComponentId;
///
/// let id = ComponentId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ComponentId(u32);

impl ComponentId {
    /// Creates a component identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u32) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised when a [`Partition`] mutation violates its preconditions.
///
/// The merge engine never triggers these; they guard direct callers.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PartitionError {
    /// The referenced component does not exist (never created or absorbed).
    #[error("component {id} is not live")]
    UnknownComponent {
        /// The missing component.
        id: ComponentId,
    },
    /// The node already belongs to a component.
    #[error("node `{node}` already belongs to component {owner}")]
    NodeAlreadyAssigned {
        /// The node that was expected to be unseen.
        node: Arc<str>,
        /// The component currently owning the node.
        owner: ComponentId,
    },
    /// A component cannot be created from a single node.
    #[error("node `{node}` cannot form a component with itself")]
    SelfLoop {
        /// The repeated endpoint.
        node: Arc<str>,
    },
    /// A merge named the same component twice.
    #[error("component {id} cannot be merged with itself")]
    SameComponent {
        /// The repeated component.
        id: ComponentId,
    },
}

/// A connected set of nodes together with its absorbed-edge statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: ComponentId,
    members: Vec<Arc<str>>,
    edge_count: usize,
    total_weight: f64,
    first_edge_index: usize,
}

impl Component {
    fn new(id: ComponentId, a: Arc<str>, b: Arc<str>, weight: f64, edge_index: usize) -> Self {
        Self {
            id,
            members: vec![a, b],
            edge_count: 1,
            total_weight: weight,
            first_edge_index: edge_index,
        }
    }

    /// Returns the component identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn id(&self) -> ComponentId { self.id }

    /// Returns the member node ids in the order they joined.
    #[must_use]
    pub fn members(&self) -> &[Arc<str>] {
        &self.members
    }

    /// Returns the number of member nodes (always at least two).
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Returns the number of absorbed edges, including merge-triggering edges.
    #[rustfmt::skip]
    #[must_use]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the sum of absorbed edge weights.
    #[rustfmt::skip]
    #[must_use]
    pub const fn total_weight(&self) -> f64 { self.total_weight }

    /// Returns the smallest source position among absorbed edges.
    #[rustfmt::skip]
    #[must_use]
    pub const fn first_edge_index(&self) -> usize { self.first_edge_index }

    /// Returns absorbed edges divided by the edge count of a complete graph
    /// over the members. Multi-edges can push the value above `1.0`.
    ///
    /// # Examples
    /// ```
    /// use strata_core::Partition;
    ///
    /// let mut partition = Partition::new();
    /// let id = partition.create_component("a", "b", 1.0, 0)?;
    /// let component = partition.component(id).expect("component is live");
    /// assert_eq!(component.density(), 1.0);
    /// # Ok::<(), strata_core::PartitionError>(())
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "density is a ratio of counts"
    )]
    pub fn density(&self) -> f64 {
        let size = self.size() as f64;
        self.edge_count as f64 / (size * (size - 1.0) / 2.0)
    }

    /// Returns the mean weight of absorbed edges.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "mean of accumulated weights"
    )]
    pub fn mean_weight(&self) -> f64 {
        self.total_weight / self.edge_count as f64
    }

    #[expect(clippy::float_arithmetic, reason = "accumulate edge weight")]
    fn absorb_edge(&mut self, weight: f64, edge_index: usize) {
        self.edge_count += 1;
        self.total_weight += weight;
        self.first_edge_index = self.first_edge_index.min(edge_index);
    }

    #[expect(clippy::float_arithmetic, reason = "fold donor weight")]
    fn absorb(&mut self, donor: Self) {
        self.members.extend(donor.members);
        self.edge_count += donor.edge_count;
        self.total_weight += donor.total_weight;
        self.first_edge_index = self.first_edge_index.min(donor.first_edge_index);
    }
}

/// Result of merging two components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    receiver: ComponentId,
    donor: ComponentId,
    receiver_size: usize,
    donor_size: usize,
}

impl MergeOutcome {
    /// Returns the surviving component.
    #[rustfmt::skip]
    #[must_use]
    pub const fn receiver(&self) -> ComponentId { self.receiver }

    /// Returns the absorbed, now-deleted component.
    #[rustfmt::skip]
    #[must_use]
    pub const fn donor(&self) -> ComponentId { self.donor }

    /// Returns the receiver's member count before the merge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn receiver_size(&self) -> usize { self.receiver_size }

    /// Returns the donor's member count before the merge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn donor_size(&self) -> usize { self.donor_size }
}

/// Node index plus component store for one run.
///
/// # Examples
/// ```
/// use strata_core::Partition;
///
/// let mut partition = Partition::new();
/// let left = partition.create_component("a", "b", 5.0, 0)?;
/// let right = partition.create_component("c", "d", 5.0, 1)?;
/// let merged = partition.merge(left, right, 3.0, 2)?;
///
/// assert_eq!(merged.receiver(), left);
/// assert_eq!(partition.lookup("d"), Some(left));
/// assert_eq!(partition.component_count(), 1);
/// assert_eq!(partition.nodes_seen(), 4);
/// # Ok::<(), strata_core::PartitionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Partition {
    node_index: HashMap<Arc<str>, ComponentId>,
    components: BTreeMap<ComponentId, Component>,
    last_id: u32,
}

impl Partition {
    /// Creates an empty partition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the component currently owning `node`.
    #[must_use]
    pub fn lookup(&self, node: &str) -> Option<ComponentId> {
        self.node_index.get(node).copied()
    }

    /// Returns the number of distinct nodes seen so far.
    #[must_use]
    pub fn nodes_seen(&self) -> usize {
        self.node_index.len()
    }

    /// Returns the number of live components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns the live component with `id`.
    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Iterates live components in ascending id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Creates a component from an edge between two unseen nodes.
    ///
    /// # Errors
    /// Returns [`PartitionError::SelfLoop`] when `a == b` and
    /// [`PartitionError::NodeAlreadyAssigned`] when either node was seen.
    pub fn create_component(
        &mut self,
        a: &str,
        b: &str,
        weight: f64,
        edge_index: usize,
    ) -> Result<ComponentId, PartitionError> {
        if a == b {
            return Err(PartitionError::SelfLoop {
                node: Arc::from(a),
            });
        }
        self.ensure_unseen(a)?;
        self.ensure_unseen(b)?;

        self.last_id = self.last_id.saturating_add(1);
        let id = ComponentId(self.last_id);
        let first: Arc<str> = Arc::from(a);
        let second: Arc<str> = Arc::from(b);
        self.node_index.insert(Arc::clone(&first), id);
        self.node_index.insert(Arc::clone(&second), id);
        self.components
            .insert(id, Component::new(id, first, second, weight, edge_index));
        Ok(id)
    }

    /// Adds an unseen node to an existing component via a new edge.
    ///
    /// # Errors
    /// Returns [`PartitionError::UnknownComponent`] when `id` is not live and
    /// [`PartitionError::NodeAlreadyAssigned`] when `new_member` was seen.
    pub fn extend_component(
        &mut self,
        id: ComponentId,
        new_member: &str,
        weight: f64,
        edge_index: usize,
    ) -> Result<(), PartitionError> {
        self.ensure_unseen(new_member)?;
        let component = self
            .components
            .get_mut(&id)
            .ok_or(PartitionError::UnknownComponent { id })?;
        let member: Arc<str> = Arc::from(new_member);
        self.node_index.insert(Arc::clone(&member), id);
        component.members.push(member);
        component.absorb_edge(weight, edge_index);
        Ok(())
    }

    /// Records an edge whose endpoints already share component `id`.
    ///
    /// # Errors
    /// Returns [`PartitionError::UnknownComponent`] when `id` is not live.
    pub fn add_repeat_edge(
        &mut self,
        id: ComponentId,
        weight: f64,
        edge_index: usize,
    ) -> Result<(), PartitionError> {
        let component = self
            .components
            .get_mut(&id)
            .ok_or(PartitionError::UnknownComponent { id })?;
        component.absorb_edge(weight, edge_index);
        Ok(())
    }

    /// Merges two components bridged by an edge.
    ///
    /// The component with fewer members donates its members to the other;
    /// equal sizes favour the older (smaller) id as receiver. The bridging
    /// edge counts as one more absorbed edge and the donor is erased.
    ///
    /// # Errors
    /// Returns [`PartitionError::SameComponent`] when `first == second` and
    /// [`PartitionError::UnknownComponent`] when either id is not live.
    pub fn merge(
        &mut self,
        first: ComponentId,
        second: ComponentId,
        weight: f64,
        edge_index: usize,
    ) -> Result<MergeOutcome, PartitionError> {
        if first == second {
            return Err(PartitionError::SameComponent { id: first });
        }
        let first_size = self.size_of(first)?;
        let second_size = self.size_of(second)?;
        let first_receives =
            first_size > second_size || (first_size == second_size && first < second);
        let outcome = if first_receives {
            MergeOutcome {
                receiver: first,
                donor: second,
                receiver_size: first_size,
                donor_size: second_size,
            }
        } else {
            MergeOutcome {
                receiver: second,
                donor: first,
                receiver_size: second_size,
                donor_size: first_size,
            }
        };

        let donor = self
            .components
            .remove(&outcome.donor)
            .ok_or(PartitionError::UnknownComponent { id: outcome.donor })?;
        for member in &donor.members {
            if let Some(owner) = self.node_index.get_mut(member.as_ref()) {
                *owner = outcome.receiver;
            }
        }
        let receiver = self
            .components
            .get_mut(&outcome.receiver)
            .ok_or(PartitionError::UnknownComponent {
                id: outcome.receiver,
            })?;
        receiver.absorb(donor);
        receiver.absorb_edge(weight, edge_index);
        Ok(outcome)
    }

    fn size_of(&self, id: ComponentId) -> Result<usize, PartitionError> {
        self.components
            .get(&id)
            .map(Component::size)
            .ok_or(PartitionError::UnknownComponent { id })
    }

    fn ensure_unseen(&self, node: &str) -> Result<(), PartitionError> {
        match self.lookup(node) {
            Some(owner) => Err(PartitionError::NodeAlreadyAssigned {
                node: Arc::from(node),
                owner,
            }),
            None => Ok(()),
        }
    }
}
