use std::sync::Arc;

use rstest::rstest;
use strata_core::{
    ComponentId, EdgeSourceError, EdgeSourceErrorCode, PartitionError, StrataError,
    StrataErrorCode,
};

#[rstest]
#[case(EdgeSourceError::OutOfBounds { index: 0 }, EdgeSourceErrorCode::OutOfBounds)]
#[case(
    EdgeSourceError::ColumnLengthMismatch { a: 1, b: 2, weight: 2 },
    EdgeSourceErrorCode::ColumnLengthMismatch,
)]
fn returns_expected_edge_source_code(
    #[case] error: EdgeSourceError,
    #[case] expected: EdgeSourceErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
}

#[rstest]
#[case(
    StrataError::InvalidOrderCheckWindow { got: 0 },
    StrataErrorCode::InvalidOrderCheckWindow,
    None,
)]
#[case(
    StrataError::UnsortedWeights {
        data_source: Arc::from("edges"),
        index: 3,
        previous: 1.0,
        current: 2.0,
    },
    StrataErrorCode::UnsortedWeights,
    None,
)]
#[case(
    StrataError::NonFiniteWeight { data_source: Arc::from("edges"), index: 0, weight: f64::NAN },
    StrataErrorCode::NonFiniteWeight,
    None,
)]
#[case(
    StrataError::TooManyEdges { data_source: Arc::from("edges"), edges: 10, limit: 5 },
    StrataErrorCode::TooManyEdges,
    None,
)]
#[case(
    StrataError::from(PartitionError::UnknownComponent { id: ComponentId::new(9) }),
    StrataErrorCode::InvariantViolation,
    None,
)]
#[case(
    StrataError::EdgeSource {
        data_source: Arc::from("edges"),
        error: EdgeSourceError::OutOfBounds { index: 1 },
    },
    StrataErrorCode::EdgeSourceFailure,
    Some(EdgeSourceErrorCode::OutOfBounds),
)]
fn returns_expected_strata_code(
    #[case] error: StrataError,
    #[case] expected: StrataErrorCode,
    #[case] source_code: Option<EdgeSourceErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.edge_source_code(), source_code);
}

#[rstest]
#[case(StrataErrorCode::InvalidOrderCheckWindow, "STRATA_INVALID_ORDER_CHECK_WINDOW")]
#[case(StrataErrorCode::UnsortedWeights, "STRATA_UNSORTED_WEIGHTS")]
#[case(StrataErrorCode::NonFiniteWeight, "STRATA_NON_FINITE_WEIGHT")]
#[case(StrataErrorCode::TooManyEdges, "STRATA_TOO_MANY_EDGES")]
#[case(StrataErrorCode::InvariantViolation, "STRATA_INVARIANT_VIOLATION")]
#[case(StrataErrorCode::EdgeSourceFailure, "STRATA_EDGE_SOURCE_FAILURE")]
fn codes_render_stable_strings(#[case] code: StrataErrorCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
    assert_eq!(code.to_string(), expected);
}

#[test]
fn unsorted_message_names_source_and_position() {
    let err = StrataError::UnsortedWeights {
        data_source: Arc::from("edges"),
        index: 3,
        previous: 1.0,
        current: 2.5,
    };
    let message = err.to_string();
    assert!(message.contains("`edges`"));
    assert!(message.contains("edge 3 has weight 2.5 after 1"));
}
