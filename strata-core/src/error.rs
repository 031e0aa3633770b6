//! Error types for the strata core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::partition::PartitionError;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::EdgeSource`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EdgeSourceError {
    /// Requested edge was outside the source's bounds.
    #[error("edge index {index} is out of bounds")]
    OutOfBounds {
        /// The requested edge position that exceeded the source bounds.
        index: usize,
    },
    /// Endpoint and weight columns had different lengths.
    #[error("column lengths differ: a={a}, b={b}, weight={weight}")]
    ColumnLengthMismatch {
        /// Number of values in the first endpoint column.
        a: usize,
        /// Number of values in the second endpoint column.
        b: usize,
        /// Number of values in the weight column.
        weight: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`EdgeSourceError`] variants.
    enum EdgeSourceErrorCode for EdgeSourceError {
        /// Requested edge was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "EDGE_SOURCE_OUT_OF_BOUNDS",
        /// Endpoint and weight columns had different lengths.
        ColumnLengthMismatch => ColumnLengthMismatch { .. } => "EDGE_SOURCE_COLUMN_LENGTH_MISMATCH",
    }
}

/// Error type produced when configuring or running [`crate::Strata`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StrataError {
    /// A prefix ordering check must inspect at least one edge.
    #[error("order check window must be at least 1 (got {got})")]
    InvalidOrderCheckWindow {
        /// The invalid window supplied by the caller.
        got: usize,
    },
    /// Edge weights were not sorted in descending order.
    #[error(
        "edge source `{data_source}` is not sorted by descending weight: edge {index} has weight {current} after {previous}"
    )]
    UnsortedWeights {
        /// Identifier for the offending edge source.
        data_source: Arc<str>,
        /// Position of the first edge that increased the weight.
        index: usize,
        /// Weight of the edge preceding `index`.
        previous: f64,
        /// Weight of the edge at `index`.
        current: f64,
    },
    /// An edge carried a NaN or infinite weight.
    #[error("edge source `{data_source}` has non-finite weight {weight} at edge {index}")]
    NonFiniteWeight {
        /// Identifier for the offending edge source.
        data_source: Arc<str>,
        /// Position of the offending edge.
        index: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// The source holds more edges than component identifiers can address.
    #[error("edge source `{data_source}` has {edges} edges; at most {limit} are supported")]
    TooManyEdges {
        /// Identifier for the oversized edge source.
        data_source: Arc<str>,
        /// Number of edges in the source.
        edges: usize,
        /// Largest supported number of edges.
        limit: usize,
    },
    /// The partition rejected a transition the merge engine requested.
    #[error("partition invariant violated: {error}")]
    InvariantViolation {
        #[source]
        /// The rejected partition mutation.
        error: PartitionError,
    },
    /// An [`crate::EdgeSource`] operation failed while running the algorithm.
    #[error("edge source `{data_source}` failed: {error}")]
    EdgeSource {
        /// Identifier for the edge source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying edge source error bubbled up by the algorithm.
        error: EdgeSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`StrataError`] variants.
    enum StrataErrorCode for StrataError {
        /// A prefix ordering check must inspect at least one edge.
        InvalidOrderCheckWindow => InvalidOrderCheckWindow { .. } => "STRATA_INVALID_ORDER_CHECK_WINDOW",
        /// Edge weights were not sorted in descending order.
        UnsortedWeights => UnsortedWeights { .. } => "STRATA_UNSORTED_WEIGHTS",
        /// An edge carried a NaN or infinite weight.
        NonFiniteWeight => NonFiniteWeight { .. } => "STRATA_NON_FINITE_WEIGHT",
        /// The source holds more edges than component identifiers can address.
        TooManyEdges => TooManyEdges { .. } => "STRATA_TOO_MANY_EDGES",
        /// The partition rejected a transition the merge engine requested.
        InvariantViolation => InvariantViolation { .. } => "STRATA_INVARIANT_VIOLATION",
        /// An [`crate::EdgeSource`] operation failed while running the algorithm.
        EdgeSourceFailure => EdgeSource { .. } => "STRATA_EDGE_SOURCE_FAILURE",
    }
}

impl StrataError {
    /// Retrieve the inner [`EdgeSourceErrorCode`] when the error originated in an [`crate::EdgeSource`].
    pub const fn edge_source_code(&self) -> Option<EdgeSourceErrorCode> {
        match self {
            Self::EdgeSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<PartitionError> for StrataError {
    fn from(error: PartitionError) -> Self {
        Self::InvariantViolation { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, StrataError>;
