pub mod route;
pub mod schedule;
pub mod solution;
pub mod stop;
