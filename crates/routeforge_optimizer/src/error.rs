use routeforge_matrix::error::MatrixError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Invalid travel matrices: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Invalid genetic algorithm parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}
