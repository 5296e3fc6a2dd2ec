use rand::{Rng, SeedableRng, rngs::SmallRng};
use routeforge_matrix::coordinates::Coordinates;
use tracing::info;

use crate::{error::OptimizerError, problem::vehicle_routing_problem::VehicleRoutingProblem};

use super::{
    genetic::GeneticSearch, solution::solution::Solution, solver_params::GaParams,
    statistics::SearchStatistics,
};

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub best: Solution,
    pub statistics: SearchStatistics,
}

pub struct Solver {
    problem: VehicleRoutingProblem,
    params: GaParams,
    on_best_solution_handler: Option<Box<dyn FnMut(&Solution)>>,
}

impl Solver {
    pub fn new(problem: VehicleRoutingProblem, params: GaParams) -> Self {
        Solver {
            problem,
            params,
            on_best_solution_handler: None,
        }
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        &self.problem
    }

    pub fn params(&self) -> &GaParams {
        &self.params
    }

    /// Replaces the haversine estimate with caller supplied matrices.
    /// Fails before any optimization on a dimension mismatch.
    pub fn use_matrices(
        &mut self,
        distances_km: Vec<Vec<f64>>,
        times_min: Vec<Vec<f64>>,
        points: &[Coordinates],
    ) -> Result<(), OptimizerError> {
        self.problem.use_matrices(distances_km, times_min, points)
    }

    /// Called each time the best solution improves, starting with the best
    /// individual of the initial population.
    pub fn on_best_solution(&mut self, callback: impl FnMut(&Solution) + 'static) {
        self.on_best_solution_handler = Some(Box::new(callback));
    }

    /// Runs the search with the configured seed, or a random one when unset.
    pub fn solve(&mut self) -> Result<OptimizationResult, OptimizerError> {
        let mut rng = match self.params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        self.solve_with_rng(&mut rng)
    }

    pub fn solve_with_rng<R>(&mut self, rng: &mut R) -> Result<OptimizationResult, OptimizerError>
    where
        R: Rng,
    {
        self.params.validate()?;

        let Solver {
            problem,
            params,
            on_best_solution_handler,
        } = self;

        let mut search = GeneticSearch::new(problem, params);
        if let Some(handler) = on_best_solution_handler.as_mut() {
            search.on_best_solution(|solution| handler(solution));
        }

        let (best, statistics) = search.run(rng);

        info!(
            routes = best.routes().len(),
            distance_km = best.total_distance_km(),
            fitness = best.fitness(),
            "Best solution"
        );

        Ok(OptimizationResult { best, statistics })
    }
}
