//! Step-boundary detection and per-step cluster statistics.
//!
//! A step is the maximal run of consecutive edges sharing one weight. Once
//! the last edge of a step has been folded, the live component store is
//! scanned once to produce a [`StepSummary`] and one [`ComponentDetail`] per
//! component.

use crate::partition::{ComponentId, Partition};

/// One row of the step table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepSummary {
    /// One-based step number.
    pub step: usize,
    /// Edges processed up to and including this step.
    pub n_edges: usize,
    /// Weight shared by every edge of the step.
    pub strength: f64,
    /// Distinct nodes touched so far.
    pub nodes_seen: usize,
    /// Live components after the step.
    pub num_components: usize,
    /// Components with more than two members.
    pub n_triples: usize,
    /// Largest component size.
    pub max_size: usize,
    /// `max_size / nodes_seen`.
    pub rel_max_size: f64,
    /// `nodes_seen / num_components`.
    pub avg_size: f64,
    /// Mean density across live components.
    pub avg_density: f64,
}

/// One row of the per-step component table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentDetail {
    /// Component identifier.
    pub component_id: ComponentId,
    /// Member count.
    pub size: usize,
    /// Absorbed edge count.
    pub edge_count: usize,
    /// Absorbed edges over complete-graph edges for `size` members.
    pub density: f64,
    /// Mean weight of absorbed edges.
    pub mean_weight: f64,
    /// Smallest zero-based source position among absorbed edges.
    pub first_edge_index: usize,
}

/// Statistics captured at one step boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step {
    /// Step-level scalars.
    pub summary: StepSummary,
    /// Live components in ascending id order.
    pub components: Vec<ComponentDetail>,
}

/// Returns whether `current` closes its step given the following weight.
///
/// `None` means no edges follow, so the final edge always closes a step.
///
/// # Examples
/// ```
/// use strata_core::closes_step;
///
/// assert!(!closes_step(5.0, Some(5.0)));
/// assert!(closes_step(5.0, Some(3.0)));
/// assert!(closes_step(1.0, None));
/// ```
#[must_use]
#[expect(clippy::float_cmp, reason = "steps group exactly equal weights")]
pub fn closes_step(current: f64, next: Option<f64>) -> bool {
    next.is_none_or(|following| following != current)
}

/// Scans the live components of `partition` into a [`Step`].
///
/// Ratios are reported as `0.0` while no component exists, which only
/// happens when every edge so far was a self-loop on an unseen node.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "step statistics are ratios of counts"
)]
pub fn summarise_step(partition: &Partition, step: usize, n_edges: usize, strength: f64) -> Step {
    let nodes_seen = partition.nodes_seen();
    let num_components = partition.component_count();

    let mut n_triples = 0;
    let mut max_size = 0;
    let mut total_density = 0.0;
    let mut components = Vec::with_capacity(num_components);
    for component in partition.components() {
        let size = component.size();
        let density = component.density();
        if size > 2 {
            n_triples += 1;
        }
        max_size = max_size.max(size);
        total_density += density;
        components.push(ComponentDetail {
            component_id: component.id(),
            size,
            edge_count: component.edge_count(),
            density,
            mean_weight: component.mean_weight(),
            first_edge_index: component.first_edge_index(),
        });
    }

    let (rel_max_size, avg_size, avg_density) = if num_components == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let components_f = num_components as f64;
        let nodes_f = nodes_seen as f64;
        (
            max_size as f64 / nodes_f,
            nodes_f / components_f,
            total_density / components_f,
        )
    };

    Step {
        summary: StepSummary {
            step,
            n_edges,
            strength,
            nodes_seen,
            num_components,
            n_triples,
            max_size,
            rel_max_size,
            avg_size,
            avg_density,
        },
        components,
    }
}
