//! Prefix length needed to touch a target number of nodes.

use std::collections::HashSet;

use tracing::debug;

use crate::{Result, source::EdgeSource, strata::fetch};

/// Returns the smallest number of leading edges whose endpoints cover at
/// least `node_count` distinct nodes, or `None` when the whole source covers
/// fewer.
///
/// Self-loops count their single endpoint once. A target of zero is met by
/// the empty prefix.
///
/// # Errors
/// Returns [`crate::StrataError::EdgeSource`] when the source fails to yield
/// an edge.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, edges_to_cover};
///
/// let edges = EdgeList::new("demo", [("a", "b", 3.0), ("b", "c", 2.0), ("d", "e", 1.0)]);
/// assert_eq!(edges_to_cover(&edges, 3)?, Some(2));
/// assert_eq!(edges_to_cover(&edges, 6)?, None);
/// # Ok::<(), strata_core::StrataError>(())
/// ```
pub fn edges_to_cover<S>(source: &S, node_count: usize) -> Result<Option<usize>>
where
    S: EdgeSource + ?Sized,
{
    if node_count == 0 {
        return Ok(Some(0));
    }
    let mut seen: HashSet<&str> = HashSet::new();
    let mut index = 0;
    while let Some(edge) = fetch(source, index)? {
        seen.insert(edge.a());
        seen.insert(edge.b());
        index += 1;
        if seen.len() >= node_count {
            debug!(node_count, edges = index, "node target covered");
            return Ok(Some(index));
        }
    }
    Ok(None)
}
