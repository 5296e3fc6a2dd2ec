use rand::Rng;

use crate::solver::solution::solution::Solution;

use super::{mutate_solution::MutateSolution, mutation_context::MutationContext};

/// Swaps one random stop between two distinct random routes.
///
/// Capacity and time windows are not checked, both routes are only rescheduled.
pub struct RouteExchangeMutation;

impl MutateSolution for RouteExchangeMutation {
    fn mutate_solution<R>(
        &self,
        solution: &mut Solution,
        MutationContext { problem, rng }: MutationContext<R>,
    ) where
        R: Rng,
    {
        let num_routes = solution.routes().len();
        if num_routes < 2 {
            return;
        }

        let first = rng.random_range(0..num_routes);
        let mut second = rng.random_range(0..num_routes - 1);
        if second >= first {
            second += 1;
        }

        let (first_route, second_route) = solution.route_pair_mut(first, second);
        let first_position = rng.random_range(0..first_route.len());
        let second_position = rng.random_range(0..second_route.len());

        let moved_out = first_route.order_id(first_position);
        let moved_in = second_route.replace_order(problem, second_position, moved_out);
        first_route.replace_order(problem, first_position, moved_in);
    }
}
