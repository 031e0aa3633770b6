//! Reader for delimited text edge tables with a header row.
use std::{io::BufRead, sync::Arc};

use crate::columns::EdgeColumns;
use crate::errors::EdgeTableProviderError;
use crate::ingest::Interner;

pub(crate) struct DelimitedTable {
    pub(crate) a: Vec<Arc<str>>,
    pub(crate) b: Vec<Arc<str>>,
    pub(crate) weights: Vec<f64>,
}

/// Positions of the selected columns within each row.
struct Layout {
    a: usize,
    b: usize,
    weight: usize,
}

impl Layout {
    fn from_header(
        header: &str,
        delimiter: char,
        columns: &EdgeColumns,
    ) -> Result<Self, EdgeTableProviderError> {
        let names: Vec<&str> = header.split(delimiter).map(cell).collect();
        let locate = |column: &str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or_else(|| EdgeTableProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })
        };
        Ok(Self {
            a: locate(columns.a())?,
            b: locate(columns.b())?,
            weight: locate(columns.weight())?,
        })
    }
}

/// Trims a raw field and strips one pair of enclosing double quotes.
///
/// Delimiters inside quotes are not honoured; fields are split first.
fn cell(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
}

pub(crate) fn read_delimited<R: BufRead>(
    reader: R,
    delimiter: char,
    columns: &EdgeColumns,
    interner: &mut Interner,
) -> Result<DelimitedTable, EdgeTableProviderError> {
    let mut lines = reader.lines().enumerate();
    let layout = loop {
        let Some((_, read)) = lines.next() else {
            return Err(EdgeTableProviderError::MissingHeader);
        };
        let line = read?;
        if !line.trim().is_empty() {
            break Layout::from_header(&line, delimiter, columns)?;
        }
    };

    let mut table = DelimitedTable {
        a: Vec::new(),
        b: Vec::new(),
        weights: Vec::new(),
    };
    for (offset, read) in lines {
        let line = read?;
        let line_number = offset + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(delimiter).map(cell).collect();
        let field = |index: usize, column: &str| {
            fields
                .get(index)
                .copied()
                .ok_or_else(|| EdgeTableProviderError::MissingField {
                    line: line_number,
                    column: column.to_owned(),
                })
        };
        let a = field(layout.a, columns.a())?;
        let b = field(layout.b, columns.b())?;
        let raw = field(layout.weight, columns.weight())?;
        let weight = raw
            .parse::<f64>()
            .map_err(|_| EdgeTableProviderError::InvalidWeight {
                line: line_number,
                raw: raw.to_owned(),
            })?;
        table.a.push(interner.intern(a));
        table.b.push(interner.intern(b));
        table.weights.push(weight);
    }
    Ok(table)
}
