use schemars::JsonSchema;
use serde::Serialize;

use crate::problem::vehicle_routing_problem::VehicleRoutingProblem;

use super::solution::route::Route;

pub const DISTANCE_WEIGHT: f64 = 0.4;
pub const TIME_WEIGHT: f64 = 0.3;
pub const ON_TIME_WEIGHT: f64 = 0.3;

pub const FITNESS_SCALE: f64 = 1000.0;
/// Dominates the objective terms so feasibility is reached before quality.
pub const VIOLATION_PENALTY: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct ObjectiveScores {
    pub distance: f64,
    pub time: f64,
    pub on_time: f64,
}

impl ObjectiveScores {
    pub fn weighted(&self) -> f64 {
        DISTANCE_WEIGHT * self.distance + TIME_WEIGHT * self.time + ON_TIME_WEIGHT * self.on_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct FitnessScore {
    pub fitness: f64,
    pub raw: f64,
    pub objectives: ObjectiveScores,
    pub constraint_violations: usize,
}

impl FitnessScore {
    pub fn new(objectives: ObjectiveScores, constraint_violations: usize) -> Self {
        let raw = objectives.weighted();
        FitnessScore {
            fitness: compute_fitness(raw, constraint_violations),
            raw,
            objectives,
            constraint_violations,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.constraint_violations == 0
    }
}

pub fn compute_fitness(raw: f64, constraint_violations: usize) -> f64 {
    raw * FITNESS_SCALE - constraint_violations as f64 * VIOLATION_PENALTY
}

/// Counts the hard constraint violations of a single route:
/// one for exceeding the maximum duration, one for exceeding the maximum
/// number of stops, one for an overloaded vehicle and one per late stop.
pub fn route_violations(problem: &VehicleRoutingProblem, route: &Route) -> usize {
    let constraints = problem.constraints();
    let mut violations = 0;

    if route.total_duration() > constraints.max_route_duration() {
        violations += 1;
    }

    if route.len() > constraints.max_stops_per_vehicle {
        violations += 1;
    }

    if route.is_overloaded(problem) {
        violations += 1;
    }

    violations + route.late_stops()
}

pub fn evaluate(problem: &VehicleRoutingProblem, routes: &[Route]) -> FitnessScore {
    let route_count = routes.len() as f64;

    let total_distance: f64 = routes.iter().map(Route::total_distance_km).sum();
    let max_route_distance = routes
        .iter()
        .map(Route::total_distance_km)
        .fold(0.0, f64::max);

    let total_duration: f64 = routes.iter().map(Route::total_duration_minutes).sum();
    let max_route_duration = routes
        .iter()
        .map(Route::total_duration_minutes)
        .fold(0.0, f64::max);

    let on_time_deliveries: usize = routes.iter().map(Route::on_time_deliveries).sum();
    let total_orders = problem.orders().len().max(1) as f64;

    let objectives = ObjectiveScores {
        distance: 1.0 - total_distance / (max_route_distance * route_count).max(1.0),
        time: 1.0 - total_duration / (max_route_duration * route_count).max(1.0),
        on_time: on_time_deliveries as f64 / total_orders,
    };

    let constraint_violations = routes
        .iter()
        .map(|route| route_violations(problem, route))
        .sum();

    FitnessScore::new(objectives, constraint_violations)
}
