//! Construction of inflammation tables.
//!
//! A table holds one row per patient and one column per day.
//! Missing readings are stored as `NaN`.

use crate::error::StatsError;
use anyhow::{Context, Result};
use ndarray::Array2;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Build a table from raw rows.
///
/// # Errors
/// Returns [`StatsError::NotMatrix`] if the rows do not all have the same length.
pub fn from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>, StatsError> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);

    if let Some((row, vec)) = rows.iter().enumerate().find(|(_, vec)| vec.len() != n_cols) {
        return Err(StatsError::NotMatrix {
            row,
            len: vec.len(),
            exp_len: n_cols,
        });
    }

    Ok(Array2::from_shape_fn((n_rows, n_cols), |(i, j)| rows[i][j]))
}

/// Parse comma-delimited rows of numbers into a table.
///
/// Blank lines are skipped. Fields may be `nan` to mark missing readings.
pub fn parse_csv<R: BufRead>(reader: R) -> Result<Array2<f64>> {
    let mut rows = Vec::new();
    for (i_line, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", i_line + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .map(|field| {
                let field = field.trim();
                field
                    .parse::<f64>()
                    .with_context(|| format!("failed to parse {field:?} as a number"))
            })
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("invalid line {}", i_line + 1))?;
        rows.push(row);
    }

    let table = from_rows(&rows).context("failed to build table")?;
    Ok(table)
}

/// Load a table from a comma-delimited file.
pub fn load_csv<P: AsRef<Path>>(file: P) -> Result<Array2<f64>> {
    let file = file.as_ref();
    let reader = BufReader::new(File::open(file).with_context(|| format!("failed to open {file:?}"))?);
    parse_csv(reader).with_context(|| format!("failed to parse {file:?}"))
}
