use rand::seq::SliceRandom;
use tracing::{Level, instrument};

use crate::{
    problem::{order::OrderIdx, vehicle::VehicleIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solver::solution::solution::Solution,
};

use super::construct_route::construct_route;

/// Builds one full solution: the order pool and the vehicles are shuffled,
/// then each vehicle greedily takes its route from what remains of the pool.
pub fn construct_solution<R>(problem: &VehicleRoutingProblem, rng: &mut R) -> Solution
where
    R: rand::Rng,
{
    let mut pool: Vec<OrderIdx> = problem.order_ids().collect();
    pool.shuffle(rng);

    let mut vehicle_ids: Vec<VehicleIdx> = problem.vehicle_ids().collect();
    vehicle_ids.shuffle(rng);

    let mut routes = Vec::with_capacity(vehicle_ids.len());
    for vehicle_id in vehicle_ids {
        if pool.is_empty() {
            break;
        }

        routes.push(construct_route(problem, vehicle_id, &mut pool));
    }

    Solution::new(problem, routes)
}

#[instrument(skip_all, level = Level::DEBUG)]
pub fn create_initial_population<R>(
    problem: &VehicleRoutingProblem,
    population_size: usize,
    rng: &mut R,
) -> Vec<Solution>
where
    R: rand::Rng,
{
    (0..population_size)
        .map(|_| construct_solution(problem, rng))
        .collect()
}
