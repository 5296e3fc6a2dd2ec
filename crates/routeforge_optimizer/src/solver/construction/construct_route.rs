use crate::{
    problem::{order::OrderIdx, vehicle::VehicleIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solver::solution::{route::Route, stop::Stop},
};

const PROXIMITY_WEIGHT: f64 = 0.4;
const PUNCTUALITY_WEIGHT: f64 = 0.4;
const PRIORITY_WEIGHT: f64 = 0.2;

/// Greedy score of appending `order_id` as `candidate`, higher is better.
pub fn insertion_score(
    problem: &VehicleRoutingProblem,
    order_id: OrderIdx,
    candidate: &Stop,
) -> f64 {
    let order = problem.order(order_id);

    let proximity = 1.0 / (1.0 + candidate.distance_from_previous_km());
    let punctuality = if order.time_window().has_opened(candidate.arrival_time()) {
        1.0
    } else {
        0.5
    };

    PROXIMITY_WEIGHT * proximity
        + PUNCTUALITY_WEIGHT * punctuality
        + PRIORITY_WEIGHT * order.priority().weight()
}

/// Builds the route of `vehicle_id` by repeatedly appending the best feasible
/// order of `pool`. Appended orders are removed from the pool.
///
/// An order is feasible when it fits the remaining capacity and the vehicle
/// reaches it before its time window closes. Stops as soon as no order is
/// feasible or the route reached the maximum number of stops.
pub fn construct_route(
    problem: &VehicleRoutingProblem,
    vehicle_id: VehicleIdx,
    pool: &mut Vec<OrderIdx>,
) -> Route {
    let vehicle = problem.vehicle(vehicle_id);
    let max_stops = problem.constraints().max_stops_per_vehicle;
    let mut route = Route::empty(vehicle_id);

    while route.len() < max_stops {
        let best = pool
            .iter()
            .enumerate()
            .filter_map(|(position, &order_id)| {
                let order = problem.order(order_id);
                if !vehicle.can_carry(route.total_weight_kg() + order.weight_kg()) {
                    return None;
                }

                let candidate = route.preview_append(problem, order_id);
                if !order.time_window().is_satisfied(candidate.arrival_time()) {
                    return None;
                }

                Some((position, insertion_score(problem, order_id, &candidate)))
            })
            .max_by(|(_, first), (_, second)| first.total_cmp(second));

        let Some((position, _)) = best else {
            break;
        };

        let order_id = pool.swap_remove(position);
        route.append(problem, order_id);
    }

    route
}
