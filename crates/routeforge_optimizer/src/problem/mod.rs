pub mod constraints;
pub mod order;
pub mod time_window;
pub mod vehicle;
pub mod vehicle_routing_problem;
