use strata_core::{EdgeList, EdgeRef, EdgeSource, EdgeSourceError};

/// The four-edge example used throughout the suite.
#[must_use]
pub fn example_edges() -> EdgeList {
    EdgeList::new(
        "example",
        [
            ("A", "B", 5.0),
            ("C", "D", 5.0),
            ("A", "C", 3.0),
            ("E", "F", 1.0),
        ],
    )
}

/// Edge source that fails when asked for one specific position.
pub struct FaultySource {
    inner: EdgeList,
    fail_at: usize,
}

impl FaultySource {
    #[must_use]
    pub fn new(inner: EdgeList, fail_at: usize) -> Self {
        Self { inner, fail_at }
    }
}

impl EdgeSource for FaultySource {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn name(&self) -> &str {
        "faulty"
    }

    fn edge(&self, index: usize) -> Result<EdgeRef<'_>, EdgeSourceError> {
        if index == self.fail_at {
            return Err(EdgeSourceError::OutOfBounds { index });
        }
        self.inner.edge(index)
    }
}

/// Edge source whose edges report an index shifted away from their position.
pub struct OffsetIndexSource {
    inner: EdgeList,
    offset: usize,
}

impl OffsetIndexSource {
    #[must_use]
    pub fn new(inner: EdgeList, offset: usize) -> Self {
        Self { inner, offset }
    }
}

impl EdgeSource for OffsetIndexSource {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn name(&self) -> &str {
        "offset"
    }

    fn edge(&self, index: usize) -> Result<EdgeRef<'_>, EdgeSourceError> {
        let edge = self.inner.edge(index)?;
        Ok(EdgeRef::new(
            edge.a(),
            edge.b(),
            edge.weight(),
            index + self.offset,
        ))
    }
}
