//! Column selection for edge tables.

/// Names of the columns holding the two endpoints and the weight.
///
/// Defaults to `a`, `b` and `w`.
///
/// # Examples
/// ```
/// use strata_providers_edges::EdgeColumns;
///
/// let columns = EdgeColumns::default().with_weight("strength");
/// assert_eq!(columns.a(), "a");
/// assert_eq!(columns.weight(), "strength");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeColumns {
    a: String,
    b: String,
    weight: String,
}

impl Default for EdgeColumns {
    fn default() -> Self {
        Self::new("a", "b", "w")
    }
}

impl EdgeColumns {
    /// Selects all three columns explicitly.
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            weight: weight.into(),
        }
    }

    /// Overrides the first endpoint column.
    #[must_use]
    pub fn with_a(mut self, column: impl Into<String>) -> Self {
        self.a = column.into();
        self
    }

    /// Overrides the second endpoint column.
    #[must_use]
    pub fn with_b(mut self, column: impl Into<String>) -> Self {
        self.b = column.into();
        self
    }

    /// Overrides the weight column.
    #[must_use]
    pub fn with_weight(mut self, column: impl Into<String>) -> Self {
        self.weight = column.into();
        self
    }

    /// First endpoint column.
    #[must_use]
    pub fn a(&self) -> &str {
        &self.a
    }

    /// Second endpoint column.
    #[must_use]
    pub fn b(&self) -> &str {
        &self.b
    }

    /// Weight column.
    #[must_use]
    pub fn weight(&self) -> &str {
        &self.weight
    }
}
