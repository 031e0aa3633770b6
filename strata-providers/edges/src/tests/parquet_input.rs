use super::{EdgeColumns, EdgeTableProvider, EdgeTableProviderError, support::*};
use arrow_array::{ArrayRef, Float32Array, Float64Array, Int64Array, StringArray, UInt32Array};
use arrow_schema::{DataType, Field};
use rstest::rstest;
use std::sync::Arc;
use strata_core::{EdgeSource, StrataBuilder};

fn endpoints(provider: &EdgeTableProvider) -> Vec<(String, String, f64)> {
    (0..provider.len())
        .map(|index| {
            let edge = provider.edge(index).expect("edge in range");
            (edge.a().to_owned(), edge.b().to_owned(), edge.weight())
        })
        .collect()
}

#[rstest]
fn loads_default_columns_from_parquet() {
    let bytes = write_parquet(&build_batch(&example_rows()));
    let provider =
        EdgeTableProvider::try_from_parquet_reader("demo", bytes, &EdgeColumns::default())
            .expect("parquet must load");
    assert_eq!(provider.name(), "demo");
    assert_eq!(provider.len(), 4);
    assert_eq!(provider.weights(), &[5.0, 5.0, 3.0, 1.0]);
    assert_eq!(
        endpoints(&provider).first(),
        Some(&("A".to_owned(), "B".to_owned(), 5.0))
    );
}

#[rstest]
fn parquet_provider_feeds_the_core() {
    let bytes = write_parquet(&build_batch(&example_rows()));
    let provider =
        EdgeTableProvider::try_from_parquet_reader("demo", bytes, &EdgeColumns::default())
            .expect("parquet must load");
    let structure = StrataBuilder::new()
        .build()
        .expect("default builder")
        .run(&provider)
        .expect("run must succeed");
    let components: Vec<usize> = structure.summaries().map(|row| row.num_components).collect();
    assert_eq!(components, [2, 1, 2]);
}

#[rstest]
fn loads_renamed_and_mixed_type_columns() {
    let batch = build_custom_batch(
        vec![
            Field::new("source", DataType::Int64, false),
            Field::new("target", DataType::UInt32, false),
            Field::new("noise", DataType::Utf8, false),
            Field::new("strength", DataType::Float32, false),
        ],
        vec![
            Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef,
            Arc::new(UInt32Array::from(vec![2, 3])) as ArrayRef,
            Arc::new(StringArray::from(vec!["x", "y"])) as ArrayRef,
            Arc::new(Float32Array::from(vec![0.5, 0.25])) as ArrayRef,
        ],
    );
    let columns = EdgeColumns::new("source", "target", "strength");
    let provider = EdgeTableProvider::try_from_parquet_reader("ids", write_parquet(&batch), &columns)
        .expect("parquet must load");
    assert_eq!(
        endpoints(&provider),
        [
            ("1".to_owned(), "2".to_owned(), 0.5),
            ("2".to_owned(), "3".to_owned(), 0.25)
        ]
    );
}

#[rstest]
#[case(EdgeColumns::default().with_a("missing"), "missing")]
#[case(EdgeColumns::default().with_weight("strength"), "strength")]
fn reports_missing_columns(#[case] columns: EdgeColumns, #[case] expected: &str) {
    let bytes = write_parquet(&build_batch(&example_rows()));
    let err = EdgeTableProvider::try_from_parquet_reader("demo", bytes, &columns)
        .expect_err("missing column must fail");
    assert!(matches!(
        err,
        EdgeTableProviderError::ColumnNotFound { ref column } if column == expected
    ));
}

#[rstest]
fn rejects_non_numeric_weights() {
    let batch = build_custom_batch(
        vec![
            Field::new("a", DataType::Utf8, false),
            Field::new("b", DataType::Utf8, false),
            Field::new("w", DataType::Utf8, false),
        ],
        vec![
            Arc::new(StringArray::from(vec!["x"])) as ArrayRef,
            Arc::new(StringArray::from(vec!["y"])) as ArrayRef,
            Arc::new(StringArray::from(vec!["heavy"])) as ArrayRef,
        ],
    );
    let err = EdgeTableProvider::try_from_parquet_reader(
        "demo",
        write_parquet(&batch),
        &EdgeColumns::default(),
    )
    .expect_err("string weights must fail");
    assert!(matches!(
        err,
        EdgeTableProviderError::InvalidWeightType { actual: DataType::Utf8, .. }
    ));
}

#[rstest]
fn reports_null_cells_with_row() {
    let batch = build_custom_batch(
        vec![
            Field::new("a", DataType::Utf8, true),
            Field::new("b", DataType::Utf8, false),
            Field::new("w", DataType::Float64, false),
        ],
        vec![
            Arc::new(StringArray::from(vec![Some("x"), None])) as ArrayRef,
            Arc::new(StringArray::from(vec!["y", "z"])) as ArrayRef,
            Arc::new(Float64Array::from(vec![2.0, 1.0])) as ArrayRef,
        ],
    );
    let err = EdgeTableProvider::try_from_parquet_reader(
        "demo",
        write_parquet(&batch),
        &EdgeColumns::default(),
    )
    .expect_err("null endpoint must fail");
    assert!(matches!(
        err,
        EdgeTableProviderError::NullValue { ref column, row: 1 } if column == "a"
    ));
}

#[rstest]
fn record_batches_concatenate_in_order() {
    let first = build_batch(&[("a", "b", 3.0)]);
    let second = build_batch(&[("b", "c", 2.0), ("c", "d", 1.0)]);
    let provider = EdgeTableProvider::try_from_record_batches(
        "batches",
        [first, second],
        &EdgeColumns::default(),
    )
    .expect("batches must load");
    assert_eq!(provider.weights(), &[3.0, 2.0, 1.0]);
    assert_eq!(provider.edge(2).expect("edge").b(), "d");
}

#[rstest]
fn no_record_batches_yield_an_empty_provider() {
    let provider = EdgeTableProvider::try_from_record_batches(
        "empty",
        Vec::new(),
        &EdgeColumns::default(),
    )
    .expect("empty input is valid");
    assert!(provider.is_empty());
}

#[rstest]
fn sorting_orders_rows_strongest_first_and_keeps_ties_stable() {
    let batch = build_batch(&[("p", "q", 1.0), ("r", "s", 4.0), ("t", "u", 1.0), ("v", "w", 2.0)]);
    let provider =
        EdgeTableProvider::try_from_record_batches("mixed", [batch], &EdgeColumns::default())
            .expect("batch must load")
            .sorted_by_strength();
    let rows: Vec<String> = endpoints(&provider)
        .into_iter()
        .map(|(a, _, _)| a)
        .collect();
    assert_eq!(rows, ["r", "v", "p", "t"]);
    assert_eq!(provider.weights(), &[4.0, 2.0, 1.0, 1.0]);
}

#[rstest]
fn out_of_bounds_edges_are_reported() {
    let provider = EdgeTableProvider::try_from_record_batches(
        "demo",
        [build_batch(&example_rows())],
        &EdgeColumns::default(),
    )
    .expect("batch must load");
    let err = provider.edge(4).expect_err("index past the end");
    assert!(matches!(
        err,
        strata_core::EdgeSourceError::OutOfBounds { index: 4 }
    ));
}

#[rstest]
fn missing_parquet_path_is_an_io_error() {
    let err = EdgeTableProvider::try_from_parquet_path(
        "missing",
        "/nonexistent/strata/edges.parquet",
        &EdgeColumns::default(),
    )
    .expect_err("missing file must fail");
    assert!(matches!(err, EdgeTableProviderError::Io(_)));
}
