use rand::Rng;

use crate::solver::solution::solution::Solution;

use super::mutation_context::MutationContext;

/// Mutations only reschedule the stops they move. The caller refreshes the
/// solution totals and score once the mutation is applied.
pub trait MutateSolution {
    fn mutate_solution<R>(&self, solution: &mut Solution, context: MutationContext<R>)
    where
        R: Rng;
}

/// Index of a random route with at least `min_stops` stops.
pub(super) fn random_route_with_stops<R>(
    solution: &Solution,
    min_stops: usize,
    rng: &mut R,
) -> Option<usize>
where
    R: Rng,
{
    let candidates = solution
        .routes()
        .iter()
        .enumerate()
        .filter(|(_, route)| route.len() >= min_stops)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}
