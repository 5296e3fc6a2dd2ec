use rand::{Rng, seq::IndexedRandom};
use serde::Serialize;

use crate::solver::{solution::solution::Solution, solver_params::MutationWeights};

use super::{
    insert_mutation::InsertMutation, mutate_solution::MutateSolution,
    mutation_context::MutationContext, route_exchange_mutation::RouteExchangeMutation,
    swap_mutation::SwapMutation,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MutationOperator {
    Swap,
    Insert,
    RouteExchange,
}

impl MutationOperator {
    /// Weighted draw among the operators. Falls back to `Swap` when every weight is zero.
    pub fn select<R>(weights: &MutationWeights, rng: &mut R) -> MutationOperator
    where
        R: Rng,
    {
        let operators = [
            (MutationOperator::Swap, weights.swap),
            (MutationOperator::Insert, weights.insert),
            (MutationOperator::RouteExchange, weights.route_exchange),
        ];

        operators
            .choose_weighted(rng, |(_, weight)| *weight)
            .map(|(operator, _)| *operator)
            .unwrap_or(MutationOperator::Swap)
    }
}

impl MutateSolution for MutationOperator {
    fn mutate_solution<R>(&self, solution: &mut Solution, context: MutationContext<R>)
    where
        R: Rng,
    {
        match self {
            MutationOperator::Swap => SwapMutation.mutate_solution(solution, context),
            MutationOperator::Insert => InsertMutation.mutate_solution(solution, context),
            MutationOperator::RouteExchange => {
                RouteExchangeMutation.mutate_solution(solution, context)
            }
        }
    }
}
