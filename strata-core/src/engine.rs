//! Four-way edge transition applied to a [`Partition`].

use crate::{
    partition::{ComponentId, MergeOutcome, Partition, PartitionError},
    source::EdgeRef,
};

/// The partition change caused by one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Both endpoints were unseen and now form a new component.
    Created(ComponentId),
    /// One endpoint was unseen and joined the other endpoint's component.
    Extended(ComponentId),
    /// Both endpoints already shared a component.
    Repeated(ComponentId),
    /// The edge bridged two components.
    Merged(MergeOutcome),
    /// Both endpoints name the same unseen node; nothing is recorded.
    SelfLoop,
}

impl Transition {
    /// Returns the component holding the edge, if any.
    #[must_use]
    pub const fn component(&self) -> Option<ComponentId> {
        match self {
            Self::Created(id) | Self::Extended(id) | Self::Repeated(id) => Some(*id),
            Self::Merged(outcome) => Some(outcome.receiver()),
            Self::SelfLoop => None,
        }
    }
}

/// Folds one edge into `partition`.
///
/// A self-loop on an already seen node counts as a repeat edge on its
/// component; a self-loop on an unseen node is ignored because a component
/// needs two distinct members.
///
/// # Errors
/// Returns [`PartitionError`] only if the partition was mutated outside the
/// engine in a way that broke its invariants.
///
/// # Examples
/// ```
/// use strata_core::{EdgeRef, Partition, Transition, apply_edge};
///
/// let mut partition = Partition::new();
/// let created = apply_edge(&mut partition, EdgeRef::new("a", "b", 5.0, 0))?;
/// let extended = apply_edge(&mut partition, EdgeRef::new("b", "c", 4.0, 1))?;
/// assert!(matches!(created, Transition::Created(_)));
/// assert!(matches!(extended, Transition::Extended(_)));
/// assert_eq!(partition.nodes_seen(), 3);
/// # Ok::<(), strata_core::PartitionError>(())
/// ```
pub fn apply_edge(
    partition: &mut Partition,
    edge: EdgeRef<'_>,
) -> Result<Transition, PartitionError> {
    let (a, b, weight, index) = (edge.a(), edge.b(), edge.weight(), edge.index());
    match (partition.lookup(a), partition.lookup(b)) {
        (None, None) if edge.is_self_loop() => Ok(Transition::SelfLoop),
        (None, None) => partition
            .create_component(a, b, weight, index)
            .map(Transition::Created),
        (Some(id), None) => {
            partition.extend_component(id, b, weight, index)?;
            Ok(Transition::Extended(id))
        }
        (None, Some(id)) => {
            partition.extend_component(id, a, weight, index)?;
            Ok(Transition::Extended(id))
        }
        (Some(left), Some(right)) if left == right => {
            partition.add_repeat_edge(left, weight, index)?;
            Ok(Transition::Repeated(left))
        }
        (Some(left), Some(right)) => partition
            .merge(left, right, weight, index)
            .map(Transition::Merged),
    }
}
