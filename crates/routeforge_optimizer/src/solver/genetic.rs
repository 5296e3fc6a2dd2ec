use jiff::Timestamp;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    selector::{select_solution::SelectSolution, select_tournament::TournamentSelector},
    timer_debug,
};

use super::{
    construction::construct_solution::create_initial_population,
    crossover::route_merge_crossover::route_merge_crossover,
    mutation::{
        mutate_solution::MutateSolution, mutation_context::MutationContext,
        mutation_operator::MutationOperator,
    },
    population::Population,
    solution::solution::Solution,
    solver_params::GaParams,
    statistics::{SearchStatistics, TerminationReason},
};

pub type BestSolutionHandler<'a> = Box<dyn FnMut(&Solution) + 'a>;

/// Generational search: elitism, tournament selection, route merge crossover
/// and weighted mutation. The best solution ever seen is kept outside the
/// population so that it survives regardless of what the elites become.
pub struct GeneticSearch<'a> {
    problem: &'a VehicleRoutingProblem,
    params: &'a GaParams,
    selector: TournamentSelector,
    on_best_solution_handler: Option<BestSolutionHandler<'a>>,
}

impl<'a> GeneticSearch<'a> {
    pub fn new(problem: &'a VehicleRoutingProblem, params: &'a GaParams) -> Self {
        GeneticSearch {
            problem,
            params,
            selector: TournamentSelector::new(params.tournament_size),
            on_best_solution_handler: None,
        }
    }

    pub fn on_best_solution(&mut self, callback: impl FnMut(&Solution) + 'a) {
        self.on_best_solution_handler = Some(Box::new(callback));
    }

    pub fn run<R>(&mut self, rng: &mut R) -> (Solution, SearchStatistics)
    where
        R: Rng,
    {
        let started_at = Timestamp::now();
        let deadline = self
            .params
            .max_duration
            .and_then(|budget| started_at.checked_add(budget).ok());

        info!(
            orders = self.problem.orders().len(),
            vehicles = self.problem.vehicles().len(),
            population_size = self.params.population_size,
            generations = self.params.generations,
            "Starting genetic search"
        );

        let mut population = timer_debug!(
            "Initial population",
            Population::new(create_initial_population(
                self.problem,
                self.params.population_size,
                rng,
            ))
        );

        let mut best = population
            .best()
            .cloned()
            .unwrap_or_else(|| Solution::new(self.problem, Vec::new()));
        self.notify_best(&best);

        let mut best_fitness_history = Vec::with_capacity(self.params.generations + 1);
        best_fitness_history.push(best.fitness());

        let mut generations_without_improvement = 0;
        let mut generations_run = 0;
        let mut termination_reason = TerminationReason::Generations;

        for generation in 1..=self.params.generations {
            if deadline.is_some_and(|deadline| Timestamp::now() >= deadline) {
                debug!(generation, "Deadline reached");
                termination_reason = TerminationReason::Deadline;
                break;
            }

            population = self.next_generation(&population, rng);
            generations_run = generation;

            match population.best() {
                Some(candidate) if candidate.fitness() > best.fitness() => {
                    debug!(
                        generation,
                        fitness = candidate.fitness(),
                        violations = candidate.constraint_violations(),
                        routes = candidate.routes().len(),
                        "New best solution"
                    );
                    best = candidate.clone();
                    generations_without_improvement = 0;
                    self.notify_best(&best);
                }
                _ => generations_without_improvement += 1,
            }

            best_fitness_history.push(best.fitness());

            if generations_without_improvement >= self.params.stall_generations {
                debug!(
                    generation,
                    stall_generations = self.params.stall_generations,
                    "No improvement, stopping early"
                );
                termination_reason = TerminationReason::Stalled;
                break;
            }
        }

        let elapsed = Timestamp::now().duration_since(started_at);
        info!(
            generations = generations_run,
            fitness = best.fitness(),
            violations = best.constraint_violations(),
            unassigned = best.unassigned().len(),
            reason = ?termination_reason,
            ?elapsed,
            "Genetic search finished"
        );

        let statistics = SearchStatistics::new(
            best_fitness_history,
            generations_run,
            termination_reason,
            elapsed,
        );

        (best, statistics)
    }

    fn next_generation<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng,
    {
        let mut individuals = population.elites(self.params.elite_size);

        while individuals.len() < self.params.population_size {
            match self.breed(population, rng) {
                Some(child) => individuals.push(child),
                None => break,
            }
        }

        Population::new(individuals)
    }

    fn breed<R>(&self, population: &Population, rng: &mut R) -> Option<Solution>
    where
        R: Rng,
    {
        let parent1 = self
            .selector
            .select_solution(population.individuals(), rng)?;
        let parent2 = self
            .selector
            .select_solution(population.individuals(), rng)?;

        let mut child = if rng.random_bool(self.params.crossover_rate) {
            route_merge_crossover(self.problem, parent1, parent2)
        } else {
            parent1.clone()
        };

        if rng.random_bool(self.params.mutation_rate) {
            let operator = MutationOperator::select(&self.params.mutation_weights, rng);
            operator.mutate_solution(
                &mut child,
                MutationContext {
                    problem: self.problem,
                    rng,
                },
            );
            child.refresh(self.problem);
        }

        Some(child)
    }

    fn notify_best(&mut self, solution: &Solution) {
        if let Some(callback) = self.on_best_solution_handler.as_mut() {
            callback(solution);
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rand::{SeedableRng, rngs::SmallRng};

    use crate::test_utils;

    use super::*;

    fn params() -> GaParams {
        GaParams {
            population_size: 20,
            generations: 30,
            elite_size: 2,
            tournament_size: 3,
            stall_generations: 10,
            ..GaParams::default()
        }
    }

    #[test]
    fn test_history_is_non_decreasing() {
        let problem = test_utils::create_grid_problem(4, 4, 3, 80.0);
        let params = params();
        let mut rng = SmallRng::seed_from_u64(5);

        let (best, statistics) = GeneticSearch::new(&problem, &params).run(&mut rng);

        let history = statistics.best_fitness_history();
        assert_eq!(history.len(), statistics.generations() + 1);
        assert!(history.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(history.last().copied(), Some(best.fitness()));
        assert!(statistics.generations() <= params.generations);
    }

    #[test]
    fn test_stalls_out() {
        // Single order, a single possible solution
        let problem = test_utils::create_grid_problem(1, 1, 1, 80.0);
        let params = GaParams {
            generations: 100,
            stall_generations: 5,
            ..params()
        };
        let mut rng = SmallRng::seed_from_u64(5);

        let (_, statistics) = GeneticSearch::new(&problem, &params).run(&mut rng);

        assert_eq!(statistics.termination_reason(), TerminationReason::Stalled);
        assert_eq!(statistics.generations(), 5);
    }

    #[test]
    fn test_deadline_returns_initial_best() {
        let problem = test_utils::create_grid_problem(3, 3, 2, 80.0);
        let params = GaParams {
            max_duration: Some(SignedDuration::ZERO),
            ..params()
        };
        let mut rng = SmallRng::seed_from_u64(5);

        let (best, statistics) = GeneticSearch::new(&problem, &params).run(&mut rng);

        assert_eq!(statistics.termination_reason(), TerminationReason::Deadline);
        assert_eq!(statistics.generations(), 0);
        assert_eq!(statistics.best_fitness_history(), &[best.fitness()]);
    }

    #[test]
    fn test_callback_sees_every_improvement() {
        let problem = test_utils::create_grid_problem(4, 4, 3, 80.0);
        let params = params();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut improvements = Vec::new();

        let (best, _) = {
            let mut search = GeneticSearch::new(&problem, &params);
            search.on_best_solution(|solution| improvements.push(solution.fitness()));
            search.run(&mut rng)
        };

        assert!(!improvements.is_empty());
        assert!(improvements.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(improvements.last().copied(), Some(best.fitness()));
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = test_utils::create_grid_problem(4, 3, 2, 80.0);
        let params = params();

        let (first, _) =
            GeneticSearch::new(&problem, &params).run(&mut SmallRng::seed_from_u64(42));
        let (second, _) =
            GeneticSearch::new(&problem, &params).run(&mut SmallRng::seed_from_u64(42));

        assert_eq!(first.fitness(), second.fitness());
        assert_eq!(first.routes(), second.routes());
    }
}
