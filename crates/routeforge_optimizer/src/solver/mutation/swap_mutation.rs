use rand::Rng;

use crate::solver::solution::solution::Solution;

use super::{
    mutate_solution::{MutateSolution, random_route_with_stops},
    mutation_context::MutationContext,
};

/// Exchanges two stop positions inside one route.
pub struct SwapMutation;

impl MutateSolution for SwapMutation {
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
        let first = rng.random_range(0..len);
        // Second position is drawn among the others so the swap always changes the route
        let mut second = rng.random_range(0..len - 1);
        if second >= first {
            second += 1;
        }

        solution
            .route_mut(route_index)
            .swap_stops(problem, first, second);
    }
}
