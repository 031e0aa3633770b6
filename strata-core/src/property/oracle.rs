//! Relabelling oracle for step statistics.
//!
//! Recomputes the partition of an edge prefix from scratch by rewriting
//! every label of the absorbed side on each bridging edge. Quadratic, but
//! obviously correct for the small fixtures the suite generates.

use std::collections::{BTreeMap, HashMap};

/// Component shape reported by the oracle for one prefix.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct OracleStep {
    pub nodes_seen: usize,
    /// `(size, edge_count)` per component, sorted.
    pub shapes: Vec<(usize, usize)>,
    /// Component label of every seen node; co-members share a label.
    pub groups: BTreeMap<String, usize>,
}

pub(super) fn oracle_step(rows: &[(String, String, f64)], n_edges: usize) -> OracleStep {
    let mut labels: HashMap<&str, usize> = HashMap::new();
    let mut edge_labels: Vec<usize> = Vec::new();
    for (position, (a, b, _)) in rows.iter().take(n_edges).enumerate() {
        match (labels.get(a.as_str()).copied(), labels.get(b.as_str()).copied()) {
            (None, None) if a == b => {}
            (None, None) => {
                labels.insert(a.as_str(), position);
                labels.insert(b.as_str(), position);
                edge_labels.push(position);
            }
            (Some(label), None) => {
                labels.insert(b.as_str(), label);
                edge_labels.push(label);
            }
            (None, Some(label)) => {
                labels.insert(a.as_str(), label);
                edge_labels.push(label);
            }
            (Some(left), Some(right)) => {
                for label in labels.values_mut().chain(edge_labels.iter_mut()) {
                    if *label == right {
                        *label = left;
                    }
                }
                edge_labels.push(left);
            }
        }
    }

    let mut by_label: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    for label in labels.values() {
        by_label.entry(*label).or_default().0 += 1;
    }
    for label in &edge_labels {
        by_label.entry(*label).or_default().1 += 1;
    }
    let mut shapes: Vec<(usize, usize)> = by_label.into_values().collect();
    shapes.sort_unstable();
    OracleStep {
        nodes_seen: labels.len(),
        shapes,
        groups: labels
            .into_iter()
            .map(|(node, label)| (node.to_owned(), label))
            .collect(),
    }
}
