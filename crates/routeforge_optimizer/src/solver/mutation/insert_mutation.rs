use rand::Rng;

use crate::solver::solution::solution::Solution;

use super::{
    mutate_solution::{MutateSolution, random_route_with_stops},
    mutation_context::MutationContext,
};

/// Moves one stop to a different position of the same route.
pub struct InsertMutation;

impl MutateSolution for InsertMutation {
    fn mutate_solution<R>(
        &self,
        solution: &mut Solution,
        MutationContext { problem, rng }: MutationContext<R>,
    ) where
        R: Rng,
    {
        let Some(route_index) = random_route_with_stops(solution, 2, rng) else {
            return;
        };

        let len = solution.routes()[route_index].len();
        let from = rng.random_range(0..len);
        let mut to = rng.random_range(0..len - 1);
        if to >= from {
            to += 1;
        }

        solution.route_mut(route_index).move_stop(problem, from, to);
    }
}
