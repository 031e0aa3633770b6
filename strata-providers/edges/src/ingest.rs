//! Helpers for turning Arrow columns into endpoint and weight vectors.
use std::collections::HashSet;
use std::sync::Arc;

use arrow_array::Array;
use arrow_array::cast::AsArray;
use arrow_array::types::{Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type};
use arrow_schema::{DataType, Field};

use crate::errors::EdgeTableProviderError;

/// Deduplicates node ids so repeated endpoints share one allocation.
#[derive(Debug, Default)]
pub(crate) struct Interner {
    ids: HashSet<Arc<str>>,
}

impl Interner {
    pub(crate) fn intern(&mut self, value: &str) -> Arc<str> {
        if let Some(existing) = self.ids.get(value) {
            return Arc::clone(existing);
        }
        let id: Arc<str> = Arc::from(value);
        self.ids.insert(Arc::clone(&id));
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}

pub(crate) fn validate_endpoint_field(field: &Field) -> Result<(), EdgeTableProviderError> {
    match field.data_type() {
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt32
        | DataType::UInt64 => Ok(()),
        other => Err(EdgeTableProviderError::InvalidEndpointType {
            column: field.name().clone(),
            actual: other.clone(),
        }),
    }
}

pub(crate) fn validate_weight_field(field: &Field) -> Result<(), EdgeTableProviderError> {
    match field.data_type() {
        DataType::Float64
        | DataType::Float32
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt32 => Ok(()),
        other => Err(EdgeTableProviderError::InvalidWeightType {
            column: field.name().clone(),
            actual: other.clone(),
        }),
    }
}

pub(crate) fn append_endpoints(
    array: &dyn Array,
    column: &str,
    start_row: usize,
    interner: &mut Interner,
    out: &mut Vec<Arc<str>>,
) -> Result<(), EdgeTableProviderError> {
    let invalid = || EdgeTableProviderError::InvalidEndpointType {
        column: column.to_owned(),
        actual: array.data_type().clone(),
    };
    out.reserve(array.len());
    match array.data_type() {
        DataType::Utf8 => {
            let strings = array.as_string_opt::<i32>().ok_or_else(invalid)?;
            push_values(strings.iter(), column, start_row, |id| {
                out.push(interner.intern(id));
            })
        }
        DataType::LargeUtf8 => {
            let strings = array.as_string_opt::<i64>().ok_or_else(invalid)?;
            push_values(strings.iter(), column, start_row, |id| {
                out.push(interner.intern(id));
            })
        }
        DataType::Int32 => {
            let ints = array.as_primitive_opt::<Int32Type>().ok_or_else(invalid)?;
            push_values(ints.iter(), column, start_row, |id| {
                out.push(interner.intern(&id.to_string()));
            })
        }
        DataType::Int64 => {
            let ints = array.as_primitive_opt::<Int64Type>().ok_or_else(invalid)?;
            push_values(ints.iter(), column, start_row, |id| {
                out.push(interner.intern(&id.to_string()));
            })
        }
        DataType::UInt32 => {
            let ints = array.as_primitive_opt::<UInt32Type>().ok_or_else(invalid)?;
            push_values(ints.iter(), column, start_row, |id| {
                out.push(interner.intern(&id.to_string()));
            })
        }
        DataType::UInt64 => {
            let ints = array.as_primitive_opt::<UInt64Type>().ok_or_else(invalid)?;
            push_values(ints.iter(), column, start_row, |id| {
                out.push(interner.intern(&id.to_string()));
            })
        }
        _ => Err(invalid()),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer weights beyond 2^53 are not meaningful strengths"
)]
pub(crate) fn append_weights(
    array: &dyn Array,
    column: &str,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<(), EdgeTableProviderError> {
    let invalid = || EdgeTableProviderError::InvalidWeightType {
        column: column.to_owned(),
        actual: array.data_type().clone(),
    };
    out.reserve(array.len());
    match array.data_type() {
        DataType::Float64 => {
            let values = array.as_primitive_opt::<Float64Type>().ok_or_else(invalid)?;
            push_values(values.iter(), column, start_row, |weight| out.push(weight))
        }
        DataType::Float32 => {
            let values = array.as_primitive_opt::<Float32Type>().ok_or_else(invalid)?;
            push_values(values.iter(), column, start_row, |weight| {
                out.push(f64::from(weight));
            })
        }
        DataType::Int32 => {
            let values = array.as_primitive_opt::<Int32Type>().ok_or_else(invalid)?;
            push_values(values.iter(), column, start_row, |weight| {
                out.push(f64::from(weight));
            })
        }
        DataType::Int64 => {
            let values = array.as_primitive_opt::<Int64Type>().ok_or_else(invalid)?;
            push_values(values.iter(), column, start_row, |weight| {
                out.push(weight as f64);
            })
        }
        DataType::UInt32 => {
            let values = array.as_primitive_opt::<UInt32Type>().ok_or_else(invalid)?;
            push_values(values.iter(), column, start_row, |weight| {
                out.push(f64::from(weight));
            })
        }
        _ => Err(invalid()),
    }
}

fn push_values<T>(
    values: impl Iterator<Item = Option<T>>,
    column: &str,
    start_row: usize,
    mut push: impl FnMut(T),
) -> Result<(), EdgeTableProviderError> {
    for (offset, value) in values.enumerate() {
        let Some(present) = value else {
            return Err(EdgeTableProviderError::NullValue {
                column: column.to_owned(),
                row: start_row + offset,
            });
        };
        push(present);
    }
    Ok(())
}
