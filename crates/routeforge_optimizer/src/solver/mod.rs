pub mod construction;
pub mod crossover;
pub mod fitness;
pub mod genetic;
pub mod mutation;
pub mod population;
pub mod solution;
pub mod solver;
pub mod solver_params;
pub mod statistics;
