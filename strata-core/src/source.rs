//! Edge source abstractions for the strata core runtime.
//!
//! An edge source presents weighted associations already sorted by strength,
//! strongest first. The core never sorts; it only verifies the precondition
//! according to an [`OrderCheck`] policy before folding the stream.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{EdgeSourceError, Result, StrataError};

/// Number of leading edges inspected by the default [`OrderCheck`].
pub const DEFAULT_ORDER_CHECK_WINDOW: usize = 100;

/// A borrowed view of one weighted association.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, EdgeSource};
///
/// let edges = EdgeList::new("demo", [("a", "b", 2.0)]);
/// let edge = edges.edge(0)?;
/// assert_eq!((edge.a(), edge.b(), edge.weight(), edge.index()), ("a", "b", 2.0, 0));
/// # Ok::<(), strata_core::EdgeSourceError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeRef<'a> {
    a: &'a str,
    b: &'a str,
    weight: f64,
    index: usize,
}

impl<'a> EdgeRef<'a> {
    /// Creates an edge view.
    #[must_use]
    pub const fn new(a: &'a str, b: &'a str, weight: f64, index: usize) -> Self {
        Self {
            a,
            b,
            weight,
            index,
        }
    }

    /// Returns the first endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn a(&self) -> &'a str { self.a }

    /// Returns the second endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn b(&self) -> &'a str { self.b }

    /// Returns the association strength.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }

    /// Returns the zero-based position of the edge in its source.
    #[must_use]
    #[rustfmt::skip]
    pub const fn index(&self) -> usize { self.index }

    /// Returns whether both endpoints name the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

/// Abstraction over a strength-descending sequence of weighted associations.
///
/// # Examples
/// ```
/// use strata_core::{EdgeRef, EdgeSource, EdgeSourceError};
///
/// struct Pairs(Vec<(&'static str, &'static str, f64)>);
///
/// impl EdgeSource for Pairs {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "pairs" }
///     fn edge(&self, index: usize) -> Result<EdgeRef<'_>, EdgeSourceError> {
///         let (a, b, w) = self.0.get(index).ok_or(EdgeSourceError::OutOfBounds { index })?;
///         Ok(EdgeRef::new(a, b, *w, index))
///     }
/// }
///
/// let src = Pairs(vec![("x", "y", 1.0)]);
/// assert_eq!(src.len(), 1);
/// assert!(!src.is_empty());
/// assert_eq!(src.edge(0)?.b(), "y");
/// # Ok::<(), EdgeSourceError>(())
/// ```
pub trait EdgeSource {
    /// Returns number of edges in the source.
    fn len(&self) -> usize;

    /// Returns whether the source contains no edges.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the edge at `index`.
    ///
    /// # Errors
    /// Implementations must return [`EdgeSourceError::OutOfBounds`] for
    /// indices at or beyond [`EdgeSource::len`].
    fn edge(&self, index: usize) -> core::result::Result<EdgeRef<'_>, EdgeSourceError>;
}

/// Owned, column-oriented in-memory edge list.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, EdgeSource};
///
/// let edges = EdgeList::new("demo", [("a", "b", 5.0), ("c", "d", 3.0)]);
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges.name(), "demo");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeList {
    name: String,
    a: Vec<Arc<str>>,
    b: Vec<Arc<str>>,
    weights: Vec<f64>,
}

impl EdgeList {
    /// Builds an edge list from `(a, b, weight)` rows.
    #[must_use]
    pub fn new<S, I>(name: impl Into<String>, rows: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, S, f64)>,
    {
        let rows = rows.into_iter();
        let (lower, _) = rows.size_hint();
        let mut a = Vec::with_capacity(lower);
        let mut b = Vec::with_capacity(lower);
        let mut weights = Vec::with_capacity(lower);
        for (left, right, weight) in rows {
            a.push(Arc::from(left.as_ref()));
            b.push(Arc::from(right.as_ref()));
            weights.push(weight);
        }
        Self {
            name: name.into(),
            a,
            b,
            weights,
        }
    }

    /// Builds an edge list from three parallel columns.
    ///
    /// # Errors
    /// Returns [`EdgeSourceError::ColumnLengthMismatch`] when the columns
    /// differ in length.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use strata_core::{EdgeList, EdgeSourceError};
    ///
    /// let err = EdgeList::try_from_columns(
    ///     "bad",
    ///     vec![Arc::from("a")],
    ///     vec![],
    ///     vec![1.0],
    /// )
    /// .expect_err("columns differ in length");
    /// assert!(matches!(err, EdgeSourceError::ColumnLengthMismatch { a: 1, b: 0, weight: 1 }));
    /// ```
    pub fn try_from_columns(
        name: impl Into<String>,
        a: Vec<Arc<str>>,
        b: Vec<Arc<str>>,
        weights: Vec<f64>,
    ) -> core::result::Result<Self, EdgeSourceError> {
        if a.len() != b.len() || a.len() != weights.len() {
            return Err(EdgeSourceError::ColumnLengthMismatch {
                a: a.len(),
                b: b.len(),
                weight: weights.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            a,
            b,
            weights,
        })
    }

    /// Returns the weight column.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl EdgeSource for EdgeList {
    fn len(&self) -> usize {
        self.weights.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn edge(&self, index: usize) -> core::result::Result<EdgeRef<'_>, EdgeSourceError> {
        let out_of_bounds = EdgeSourceError::OutOfBounds { index };
        let a = self.a.get(index).ok_or(out_of_bounds.clone())?;
        let b = self.b.get(index).ok_or(out_of_bounds.clone())?;
        let weight = self.weights.get(index).ok_or(out_of_bounds)?;
        Ok(EdgeRef::new(a, b, *weight, index))
    }
}

/// How strictly the strength-descending precondition is verified.
///
/// # Examples
/// ```
/// use strata_core::OrderCheck;
///
/// assert_eq!(OrderCheck::default(), OrderCheck::Prefix(100));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderCheck {
    /// Verify only the first `n` edges.
    Prefix(usize),
    /// Verify every edge before processing.
    Full,
    /// Trust the caller and skip verification.
    Trust,
}

impl Default for OrderCheck {
    fn default() -> Self {
        Self::Prefix(DEFAULT_ORDER_CHECK_WINDOW)
    }
}

impl OrderCheck {
    fn window(self, len: usize) -> usize {
        match self {
            Self::Prefix(n) => n.min(len),
            Self::Full => len,
            Self::Trust => 0,
        }
    }
}

/// Verifies that the leading edges of `source` are finite and non-increasing.
///
/// # Errors
/// Returns [`StrataError::UnsortedWeights`] at the first weight increase,
/// [`StrataError::NonFiniteWeight`] for NaN or infinite weights, and
/// [`StrataError::EdgeSource`] when the source fails to yield an edge.
///
/// # Examples
/// ```
/// use strata_core::{EdgeList, OrderCheck, StrataError, verify_order};
///
/// let sorted = EdgeList::new("ok", [("a", "b", 2.0), ("b", "c", 1.0)]);
/// assert!(verify_order(&sorted, OrderCheck::Full).is_ok());
///
/// let unsorted = EdgeList::new("bad", [("a", "b", 1.0), ("b", "c", 2.0)]);
/// let err = verify_order(&unsorted, OrderCheck::Full).expect_err("weights increase");
/// assert!(matches!(err, StrataError::UnsortedWeights { index: 1, .. }));
/// ```
pub fn verify_order<S>(source: &S, check: OrderCheck) -> Result<()>
where
    S: EdgeSource + ?Sized,
{
    let window = check.window(source.len());
    let mut previous: Option<f64> = None;
    for index in 0..window {
        let weight = source
            .edge(index)
            .map_err(|error| wrap_source_error(source, error))?
            .weight();
        ensure_finite(source, index, weight)?;
        if let Some(prev) = previous.filter(|&prev| weight > prev) {
            warn!(
                data_source = source.name(),
                index,
                previous = prev,
                current = weight,
                "edge weights are not sorted in descending order"
            );
            return Err(StrataError::UnsortedWeights {
                data_source: Arc::from(source.name()),
                index,
                previous: prev,
                current: weight,
            });
        }
        previous = Some(weight);
    }
    debug!(data_source = source.name(), checked = window, "edge ordering verified");
    Ok(())
}

pub(crate) fn ensure_finite<S>(source: &S, index: usize, weight: f64) -> Result<()>
where
    S: EdgeSource + ?Sized,
{
    if weight.is_finite() {
        return Ok(());
    }
    Err(StrataError::NonFiniteWeight {
        data_source: Arc::from(source.name()),
        index,
        weight,
    })
}

pub(crate) fn wrap_source_error<S>(source: &S, error: EdgeSourceError) -> StrataError
where
    S: EdgeSource + ?Sized,
{
    StrataError::EdgeSource {
        data_source: Arc::from(source.name()),
        error,
    }
}
