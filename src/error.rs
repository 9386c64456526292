use thiserror::Error;

/// Errors raised by table construction and table statistics.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// A reading violates the domain of inflammation values.
    #[error("inflammation values should not be negative, but found {value}")]
    NegativeValue { value: f64 },

    /// The input is not a rectangular numeric table.
    #[error("data input should be a rectangular table: row {row} has {len} columns, expected {exp_len}")]
    NotMatrix { row: usize, len: usize, exp_len: usize },

    /// The input does not have exactly two dimensions.
    #[error("inflammation array should be two-dimensional, but has {ndim} dimensions")]
    Dimension { ndim: usize },

    /// A patient row index is out of bounds.
    #[error("patient index must be in the range 0..{n_rows}, but is {index}")]
    PatientIndex { index: usize, n_rows: usize },
}
