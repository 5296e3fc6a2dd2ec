use std::{cmp::Ordering, mem};

use fxhash::FxHashSet;
use jiff::SignedDuration;

use crate::{
    problem::{order::OrderIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solver::fitness::{self, FitnessScore},
};

use super::route::Route;

/// A complete assignment of orders to vehicles, owned by one individual.
///
/// Cloning is a deep copy, mutating a clone never affects the original.
#[derive(Debug, Clone)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<OrderIdx>,
    total_distance_km: f64,
    total_duration: SignedDuration,
    total_fuel_cost: f64,
    total_vehicle_cost: f64,
    score: FitnessScore,
}

impl Solution {
    /// Empty routes are dropped.
    pub fn new(problem: &VehicleRoutingProblem, mut routes: Vec<Route>) -> Self {
        routes.retain(|route| !route.is_empty());

        let assigned = routes
            .iter()
            .flat_map(|route| route.order_ids())
            .collect::<FxHashSet<_>>();
        let unassigned = problem
            .order_ids()
            .filter(|order_id| !assigned.contains(order_id))
            .collect();

        Solution {
            unassigned,
            total_distance_km: routes.iter().map(Route::total_distance_km).sum(),
            total_duration: routes
                .iter()
                .map(Route::total_duration)
                .fold(SignedDuration::ZERO, SignedDuration::saturating_add),
            total_fuel_cost: routes.iter().map(Route::fuel_cost).sum(),
            total_vehicle_cost: routes.iter().map(Route::vehicle_cost).sum(),
            score: fitness::evaluate(problem, &routes),
            routes,
        }
    }

    /// Recomputes totals, unassigned orders and the score after a change to the routes.
    pub fn refresh(&mut self, problem: &VehicleRoutingProblem) {
        let routes = mem::take(&mut self.routes);
        *self = Solution::new(problem, routes);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub(crate) fn route_mut(&mut self, index: usize) -> &mut Route {
        &mut self.routes[index]
    }

    /// Mutable access to two distinct routes at once.
    pub(crate) fn route_pair_mut(&mut self, first: usize, second: usize) -> (&mut Route, &mut Route) {
        assert_ne!(first, second, "route_pair_mut requires distinct routes");

        if first < second {
            let (left, right) = self.routes.split_at_mut(second);
            (&mut left[first], &mut right[0])
        } else {
            let (left, right) = self.routes.split_at_mut(first);
            (&mut right[0], &mut left[second])
        }
    }

    pub fn unassigned(&self) -> &[OrderIdx] {
        &self.unassigned
    }

    pub fn assigned_orders(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_duration(&self) -> SignedDuration {
        self.total_duration
    }

    pub fn total_fuel_cost(&self) -> f64 {
        self.total_fuel_cost
    }

    pub fn total_vehicle_cost(&self) -> f64 {
        self.total_vehicle_cost
    }

    pub fn score(&self) -> &FitnessScore {
        &self.score
    }

    pub fn fitness(&self) -> f64 {
        self.score.fitness
    }

    pub fn constraint_violations(&self) -> usize {
        self.score.constraint_violations
    }

    /// Orders by fitness, higher is better.
    pub fn cmp_fitness(&self, other: &Solution) -> Ordering {
        self.fitness().total_cmp(&other.fitness())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, OrderParams};

    use super::*;

    fn problem() -> VehicleRoutingProblem {
        test_utils::create_test_problem(
            vec![
                test_utils::create_order(0, OrderParams::at(50.01, 4.0)),
                test_utils::create_order(1, OrderParams::at(50.02, 4.0)),
                test_utils::create_order(2, OrderParams::at(50.0, 4.02)),
                test_utils::create_order(3, OrderParams::at(50.0, 4.03)),
            ],
            vec![
                test_utils::create_vehicle(0, 50.0, 4.0, 100.0),
                test_utils::create_vehicle(1, 50.0, 4.0, 100.0),
                test_utils::create_vehicle(2, 50.0, 4.0, 100.0),
            ],
        )
    }

    #[test]
    fn test_totals_match_stops() {
        let problem = problem();
        let solution = Solution::new(
            &problem,
            vec![
                test_utils::create_route(&problem, 0, vec![0, 1]),
                test_utils::create_route(&problem, 1, vec![2]),
                Route::empty(2.into()),
            ],
        );

        let stop_distance: f64 = solution
            .routes()
            .iter()
            .flat_map(|route| route.stops())
            .map(|stop| stop.distance_from_previous_km())
            .sum();

        assert_eq!(solution.routes().len(), 2);
        assert!((solution.total_distance_km() - stop_distance).abs() < 1e-9);
        assert_eq!(solution.unassigned(), &[OrderIdx::new(3)]);
        assert_eq!(solution.assigned_orders(), 3);
    }

    #[test]
    fn test_score_follows_routes() {
        let problem = problem();
        let mut solution = Solution::new(
            &problem,
            vec![
                test_utils::create_route(&problem, 0, vec![0]),
                Route::empty(1.into()),
            ],
        );

        assert_eq!(solution.score(), &fitness::evaluate(&problem, solution.routes()));

        solution.route_mut(0).append(&problem, OrderIdx::new(3));
        solution.refresh(&problem);

        assert_eq!(solution.routes().len(), 1);
        assert_eq!(solution.unassigned(), &[OrderIdx::new(1), OrderIdx::new(2)]);
        assert_eq!(solution.score(), &fitness::evaluate(&problem, solution.routes()));
    }

    #[test]
    fn test_clone_is_deep() {
        let problem = problem();
        let original = Solution::new(
            &problem,
            vec![test_utils::create_route(&problem, 0, vec![0, 1, 2])],
        );

        let mut clone = original.clone();
        clone.route_mut(0).swap_stops(&problem, 0, 2);
        clone.refresh(&problem);

        assert_eq!(original.routes()[0].order_id(0), OrderIdx::new(0));
        assert_eq!(clone.routes()[0].order_id(0), OrderIdx::new(2));
    }

    #[test]
    fn test_route_pair_mut() {
        let problem = problem();
        let mut solution = Solution::new(
            &problem,
            vec![
                test_utils::create_route(&problem, 0, vec![0]),
                test_utils::create_route(&problem, 1, vec![1]),
            ],
        );

        let (second, first) = solution.route_pair_mut(1, 0);

        assert_eq!(second.order_id(0), OrderIdx::new(1));
        assert_eq!(first.order_id(0), OrderIdx::new(0));
    }
}
