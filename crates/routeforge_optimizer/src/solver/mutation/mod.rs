pub mod insert_mutation;
pub mod mutate_solution;
pub mod mutation_context;
pub mod mutation_operator;
pub mod route_exchange_mutation;
pub mod swap_mutation;
