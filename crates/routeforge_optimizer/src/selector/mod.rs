pub mod select_solution;
pub mod select_tournament;
