use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::sync::Arc;

pub(crate) fn edge_schema(a: &str, b: &str, weight: &str) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(a, DataType::Utf8, false),
        Field::new(b, DataType::Utf8, false),
        Field::new(weight, DataType::Float64, false),
    ]))
}

pub(crate) fn build_batch(rows: &[(&str, &str, f64)]) -> RecordBatch {
    let a = StringArray::from_iter_values(rows.iter().map(|row| row.0));
    let b = StringArray::from_iter_values(rows.iter().map(|row| row.1));
    let weights = Float64Array::from_iter_values(rows.iter().map(|row| row.2));
    RecordBatch::try_new(
        edge_schema("a", "b", "w"),
        vec![
            Arc::new(a) as ArrayRef,
            Arc::new(b) as ArrayRef,
            Arc::new(weights) as ArrayRef,
        ],
    )
    .expect("batch")
}

pub(crate) fn build_custom_batch(fields: Vec<Field>, arrays: Vec<ArrayRef>) -> RecordBatch {
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).expect("batch")
}

pub(crate) fn write_parquet(batch: &RecordBatch) -> Bytes {
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None).expect("writer");
        writer.write(batch).expect("write");
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

pub(crate) fn example_rows() -> Vec<(&'static str, &'static str, f64)> {
    vec![
        ("A", "B", 5.0),
        ("C", "D", 5.0),
        ("A", "C", 3.0),
        ("E", "F", 1.0),
    ]
}
