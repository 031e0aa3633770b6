//! Edge table provider and its loaders.
use std::{fs::File, io::BufRead, path::Path, sync::Arc};

use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_schema::Schema;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use strata_core::{EdgeRef, EdgeSource, EdgeSourceError};
use tracing::{debug, instrument};

use crate::columns::EdgeColumns;
use crate::delimited::read_delimited;
use crate::errors::EdgeTableProviderError;
use crate::ingest::{
    Interner, append_endpoints, append_weights, validate_endpoint_field, validate_weight_field,
};

/// Edge list loaded from a table, stored column-wise with interned node ids.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use strata_core::EdgeSource;
/// use strata_providers_edges::{EdgeColumns, EdgeTableProvider};
///
/// let table = "a,b,w\nx,y,2.5\ny,z,1.0\n";
/// let provider = EdgeTableProvider::try_from_delimited(
///     "demo",
///     Cursor::new(table),
///     ',',
///     &EdgeColumns::default(),
/// )?;
/// assert_eq!(provider.len(), 2);
/// assert_eq!(provider.edge(1)?.b(), "z");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct EdgeTableProvider {
    name: String,
    a: Vec<Arc<str>>,
    b: Vec<Arc<str>>,
    weights: Vec<f64>,
}

impl EdgeTableProvider {
    pub(crate) fn from_parts(
        name: impl Into<String>,
        a: Vec<Arc<str>>,
        b: Vec<Arc<str>>,
        weights: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(a.len(), weights.len());
        debug_assert_eq!(b.len(), weights.len());
        Self {
            name: name.into(),
            a,
            b,
            weights,
        }
    }

    /// Returns the weight column in row order.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Reorders the rows strongest first.
    ///
    /// Rows of equal weight keep their relative order, so an input that is
    /// already descending is returned unchanged.
    #[must_use]
    pub fn sorted_by_strength(self) -> Self {
        let mut order: Vec<usize> = (0..self.weights.len()).collect();
        order.sort_by(|&left, &right| self.weights[right].total_cmp(&self.weights[left]));
        let a = order.iter().map(|&row| Arc::clone(&self.a[row])).collect();
        let b = order.iter().map(|&row| Arc::clone(&self.b[row])).collect();
        let weights = order.iter().map(|&row| self.weights[row]).collect();
        debug!(data_source = %self.name, rows = order.len(), "edge table sorted by strength");
        Self::from_parts(self.name, a, b, weights)
    }

    /// Loads the selected columns from a Parquet file.
    ///
    /// # Errors
    /// Returns [`EdgeTableProviderError::Io`] when the file cannot be opened
    /// and the errors of [`EdgeTableProvider::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        columns: &EdgeColumns,
    ) -> Result<Self, EdgeTableProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, columns)
    }

    /// Loads the selected columns from a Parquet reader.
    ///
    /// # Errors
    /// Returns [`EdgeTableProviderError::ColumnNotFound`] when a selected
    /// column is absent, a type error when a column cannot hold ids or
    /// weights, [`EdgeTableProviderError::NullValue`] for missing cells and
    /// Parquet or Arrow errors raised while decoding.
    #[instrument(
        name = "providers.edges.parquet",
        err,
        skip(name, reader, columns),
        fields(a = columns.a(), b = columns.b(), weight = columns.weight()),
    )]
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        columns: &EdgeColumns,
    ) -> Result<Self, EdgeTableProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(
            builder.parquet_schema(),
            [columns.a(), columns.b(), columns.weight()],
        );
        let reader = builder.with_projection(mask).build()?;
        let mut loader = TableLoader::new(&reader.schema(), columns)?;
        for batch in reader {
            loader.append(&batch?)?;
        }
        Ok(loader.finish(name))
    }

    /// Loads the selected columns from in-memory record batches.
    ///
    /// Every batch must carry the selected columns; an empty iterator yields
    /// an empty provider.
    ///
    /// # Errors
    /// Returns the same column errors as
    /// [`EdgeTableProvider::try_from_parquet_reader`].
    pub fn try_from_record_batches<I>(
        name: impl Into<String>,
        batches: I,
        columns: &EdgeColumns,
    ) -> Result<Self, EdgeTableProviderError>
    where
        I: IntoIterator<Item = RecordBatch>,
    {
        let mut batches = batches.into_iter();
        let Some(first) = batches.next() else {
            return Ok(Self::from_parts(name, Vec::new(), Vec::new(), Vec::new()));
        };
        let mut loader = TableLoader::new(&first.schema(), columns)?;
        loader.append(&first)?;
        for batch in batches {
            loader.reindex(&batch.schema())?;
            loader.append(&batch)?;
        }
        Ok(loader.finish(name))
    }

    /// Loads a delimited text table whose first non-blank line is a header.
    ///
    /// Fields are trimmed and lose one pair of enclosing double quotes.
    /// Delimiters inside quotes still split the field. Blank lines are
    /// skipped.
    ///
    /// # Errors
    /// Returns [`EdgeTableProviderError::MissingHeader`] for an empty input,
    /// [`EdgeTableProviderError::ColumnNotFound`] when the header lacks a
    /// selected column, [`EdgeTableProviderError::MissingField`] for short
    /// rows and [`EdgeTableProviderError::InvalidWeight`] for weights that do
    /// not parse as numbers.
    #[instrument(
        name = "providers.edges.delimited",
        err,
        skip(name, reader, columns),
        fields(a = columns.a(), b = columns.b(), weight = columns.weight()),
    )]
    pub fn try_from_delimited<R>(
        name: impl Into<String>,
        reader: R,
        delimiter: char,
        columns: &EdgeColumns,
    ) -> Result<Self, EdgeTableProviderError>
    where
        R: BufRead,
    {
        let mut interner = Interner::default();
        let table = read_delimited(reader, delimiter, columns, &mut interner)?;
        debug!(
            rows = table.weights.len(),
            nodes = interner.len(),
            "delimited edge table loaded"
        );
        Ok(Self::from_parts(name, table.a, table.b, table.weights))
    }
}

impl EdgeSource for EdgeTableProvider {
    fn len(&self) -> usize {
        self.weights.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn edge(&self, index: usize) -> Result<EdgeRef<'_>, EdgeSourceError> {
        match (self.a.get(index), self.b.get(index), self.weights.get(index)) {
            (Some(a), Some(b), Some(weight)) => Ok(EdgeRef::new(a, b, *weight, index)),
            _ => Err(EdgeSourceError::OutOfBounds { index }),
        }
    }
}

/// Accumulates the three selected columns across record batches.
struct TableLoader<'c> {
    columns: &'c EdgeColumns,
    indices: [usize; 3],
    interner: Interner,
    a: Vec<Arc<str>>,
    b: Vec<Arc<str>>,
    weights: Vec<f64>,
}

impl<'c> TableLoader<'c> {
    fn new(schema: &Schema, columns: &'c EdgeColumns) -> Result<Self, EdgeTableProviderError> {
        let mut loader = Self {
            columns,
            indices: [0; 3],
            interner: Interner::default(),
            a: Vec::new(),
            b: Vec::new(),
            weights: Vec::new(),
        };
        loader.reindex(schema)?;
        Ok(loader)
    }

    fn reindex(&mut self, schema: &Schema) -> Result<(), EdgeTableProviderError> {
        let locate = |column: &str| {
            schema
                .index_of(column)
                .map_err(|_| EdgeTableProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })
        };
        let a = locate(self.columns.a())?;
        let b = locate(self.columns.b())?;
        let weight = locate(self.columns.weight())?;
        validate_endpoint_field(schema.field(a))?;
        validate_endpoint_field(schema.field(b))?;
        validate_weight_field(schema.field(weight))?;
        self.indices = [a, b, weight];
        Ok(())
    }

    fn append(&mut self, batch: &RecordBatch) -> Result<(), EdgeTableProviderError> {
        let [a, b, weight] = self.indices;
        let start_row = self.weights.len();
        append_endpoints(
            batch.column(a).as_ref(),
            self.columns.a(),
            start_row,
            &mut self.interner,
            &mut self.a,
        )?;
        append_endpoints(
            batch.column(b).as_ref(),
            self.columns.b(),
            start_row,
            &mut self.interner,
            &mut self.b,
        )?;
        append_weights(
            batch.column(weight).as_ref(),
            self.columns.weight(),
            start_row,
            &mut self.weights,
        )
    }

    fn finish(self, name: impl Into<String>) -> EdgeTableProvider {
        debug!(
            rows = self.weights.len(),
            nodes = self.interner.len(),
            "edge table loaded"
        );
        EdgeTableProvider::from_parts(name, self.a, self.b, self.weights)
    }
}
