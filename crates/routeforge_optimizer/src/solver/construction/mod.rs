pub mod construct_route;
pub mod construct_solution;
