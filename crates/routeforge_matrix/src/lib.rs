pub mod coordinates;
pub mod error;
pub mod haversine;
pub mod travel_matrices;
pub mod travel_oracle;
