use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("{matrix} matrix has {found} rows but {expected} points were given")]
    DimensionMismatch {
        matrix: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{matrix} matrix row {row} has {found} columns but {expected} points were given")]
    RowDimensionMismatch {
        matrix: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{matrix} matrix contains a non finite value at ({row}, {column})")]
    NonFiniteValue {
        matrix: &'static str,
        row: usize,
        column: usize,
    },

    #[error("{matrix} matrix value {value} at ({row}, {column}) is outside [0, {max}]")]
    OutOfRange {
        matrix: &'static str,
        row: usize,
        column: usize,
        value: f64,
        max: f64,
    },
}
