pub mod error;
pub mod json;
pub mod problem;
mod selector;
pub mod solver;
mod utils;

pub use routeforge_matrix as matrix;

#[cfg(test)]
pub(crate) mod test_utils;
