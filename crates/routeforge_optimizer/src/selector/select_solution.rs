use crate::solver::solution::solution::Solution;

pub trait SelectSolution {
    fn select_solution<'a>(
        &self,
        solutions: &'a [Solution],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a Solution>;
}
