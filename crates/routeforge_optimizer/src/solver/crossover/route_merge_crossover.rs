use fxhash::FxHashSet;

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::solution::{route::Route, solution::Solution},
};

fn by_descending_efficiency(solution: &Solution) -> Vec<&Route> {
    let mut routes = solution.routes().iter().collect::<Vec<_>>();
    routes.sort_by(|first, second| second.efficiency().total_cmp(&first.efficiency()));
    routes
}

/// **Route Merge Crossover**
///
/// Works at route granularity: the routes of both parents are ranked by
/// descending efficiency and copied into the child, `parent1` first, skipping
/// any route that shares an order or a vehicle with a route already taken.
/// Orders covered by no taken route end up unassigned in the child.
///
/// ```text
/// P1: [A B] (eff 3.0)   [C D] (eff 1.0)
/// P2: [B C] (eff 2.5)   [E]   (eff 2.0)
///
/// child: [A B] [C D] [E]        ([B C] conflicts on B)
/// ```
pub fn route_merge_crossover(
    problem: &VehicleRoutingProblem,
    parent1: &Solution,
    parent2: &Solution,
) -> Solution {
    let mut claimed_orders = FxHashSet::default();
    let mut claimed_vehicles = FxHashSet::default();
    let mut routes = Vec::with_capacity(parent1.routes().len().max(parent2.routes().len()));

    let candidates = by_descending_efficiency(parent1)
        .into_iter()
        .chain(by_descending_efficiency(parent2));

    for route in candidates {
        if claimed_vehicles.contains(&route.vehicle_id())
            || route
                .order_ids()
                .any(|order_id| claimed_orders.contains(&order_id))
        {
            continue;
        }

        claimed_vehicles.insert(route.vehicle_id());
        claimed_orders.extend(route.order_ids());
        routes.push(route.clone());
    }

    Solution::new(problem, routes)
}
