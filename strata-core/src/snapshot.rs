//! Partition state after a prefix of the edge stream.

use std::collections::BTreeMap;

use crate::{
    Result,
    engine::apply_edge,
    partition::{ComponentId, Partition},
    source::{EdgeSource, ensure_finite},
    strata::fetch,
};

/// Partition reached after replaying a prefix of an edge source.
#[derive(Debug, Clone)]
pub struct PartitionSnapshot {
    partition: Partition,
    edge_components: Vec<Option<ComponentId>>,
    edges_by_component: BTreeMap<ComponentId, Vec<usize>>,
}

impl PartitionSnapshot {
    /// Returns the replayed partition.
    #[must_use]
    pub const fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Returns how many edges were replayed.
    #[must_use]
    pub fn edges_replayed(&self) -> usize {
        self.edge_components.len()
    }

    /// Returns the component currently owning `node`.
    #[must_use]
    pub fn component_of(&self, node: &str) -> Option<ComponentId> {
        self.partition.lookup(node)
    }

    /// Returns the final component of every replayed edge in source order.
    ///
    /// Ignored self-loops have no component.
    #[must_use]
    pub fn edge_components(&self) -> &[Option<ComponentId>] {
        &self.edge_components
    }

    /// Returns the source positions of the edges absorbed by `id`.
    #[must_use]
    pub fn edge_indices(&self, id: ComponentId) -> &[usize] {
        self.edges_by_component.get(&id).map_or(&[], Vec::as_slice)
    }
}

/// Folds the first `n_edges` edges of `source` without ordering checks.
pub(crate) fn replay_prefix<S>(source: &S, n_edges: usize) -> Result<PartitionSnapshot>
where
    S: EdgeSource + ?Sized,
{
    let mut partition = Partition::new();
    let mut endpoints = Vec::with_capacity(n_edges.min(source.len()));
    let mut index = 0;
    while index < n_edges {
        let Some(edge) = fetch(source, index)? else {
            break;
        };
        ensure_finite(source, index, edge.weight())?;
        apply_edge(&mut partition, edge)?;
        endpoints.push(edge.a());
        index += 1;
    }

    let mut edges_by_component: BTreeMap<ComponentId, Vec<usize>> = BTreeMap::new();
    let edge_components: Vec<Option<ComponentId>> = endpoints
        .iter()
        .map(|node| partition.lookup(node))
        .collect();
    for (position, owner) in edge_components.iter().enumerate() {
        if let Some(id) = owner {
            edges_by_component.entry(*id).or_default().push(position);
        }
    }

    Ok(PartitionSnapshot {
        partition,
        edge_components,
        edges_by_component,
    })
}
