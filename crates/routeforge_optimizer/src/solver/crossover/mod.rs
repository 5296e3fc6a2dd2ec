pub mod route_merge_crossover;
