use rand::seq::IndexedRandom;

use crate::solver::solution::solution::Solution;

use super::select_solution::SelectSolution;

/// Draws `tournament_size` solutions uniformly, with replacement, and keeps the fittest.
pub struct TournamentSelector {
    tournament_size: usize,
}

impl TournamentSelector {
    pub fn new(tournament_size: usize) -> Self {
        TournamentSelector {
            tournament_size: tournament_size.max(1),
        }
    }
}

impl SelectSolution for TournamentSelector {
    fn select_solution<'a>(
        &self,
        solutions: &'a [Solution],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a Solution> {
        (0..self.tournament_size)
            .filter_map(|_| solutions.choose(rng))
            .max_by(|first, second| first.cmp_fitness(second))
    }
}
