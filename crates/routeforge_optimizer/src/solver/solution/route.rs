use jiff::{SignedDuration, Timestamp};
use routeforge_matrix::coordinates::Coordinates;

use crate::problem::{
    order::OrderIdx,
    vehicle::{Vehicle, VehicleIdx},
    vehicle_routing_problem::VehicleRoutingProblem,
};

use super::{
    schedule::{ScheduleCursor, schedule_stop},
    stop::Stop,
};

/// A vehicle and the ordered stops it serves.
///
/// Every aggregate is derived from the stop list: each structural change goes
/// through a method that reschedules the stops and recomputes the totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: VehicleIdx,
    stops: Vec<Stop>,

    total_distance_km: f64,
    total_duration: SignedDuration,
    total_weight_kg: f64,
    fuel_cost: f64,
    vehicle_cost: f64,
    efficiency: f64,
    capacity_utilization: f64,
    on_time_deliveries: usize,
}

impl Route {
    pub fn empty(vehicle_id: VehicleIdx) -> Self {
        Route {
            vehicle_id,
            stops: Vec::new(),
            total_distance_km: 0.0,
            total_duration: SignedDuration::ZERO,
            total_weight_kg: 0.0,
            fuel_cost: 0.0,
            vehicle_cost: 0.0,
            efficiency: 0.0,
            capacity_utilization: 0.0,
            on_time_deliveries: 0,
        }
    }

    pub fn new(
        problem: &VehicleRoutingProblem,
        vehicle_id: VehicleIdx,
        order_ids: impl IntoIterator<Item = OrderIdx>,
    ) -> Self {
        let mut route = Route::empty(vehicle_id);
        for order_id in order_ids {
            let stop = route.schedule_next(problem, order_id);
            route.stops.push(stop);
        }
        route.update_aggregates(problem);
        route
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a VehicleRoutingProblem) -> &'a Vehicle {
        problem.vehicle(self.vehicle_id)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn order_ids(&self) -> impl DoubleEndedIterator<Item = OrderIdx> + '_ {
        self.stops.iter().map(|stop| stop.order_id)
    }

    pub fn order_id(&self, position: usize) -> OrderIdx {
        self.stops[position].order_id
    }

    pub fn contains_order(&self, order_id: OrderIdx) -> bool {
        self.stops.iter().any(|stop| stop.order_id == order_id)
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_duration(&self) -> SignedDuration {
        self.total_duration
    }

    pub fn total_duration_minutes(&self) -> f64 {
        self.total_duration.as_secs_f64() / 60.0
    }

    pub fn total_weight_kg(&self) -> f64 {
        self.total_weight_kg
    }

    pub fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    pub fn vehicle_cost(&self) -> f64 {
        self.vehicle_cost
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn capacity_utilization(&self) -> f64 {
        self.capacity_utilization
    }

    pub fn on_time_deliveries(&self) -> usize {
        self.on_time_deliveries
    }

    pub fn late_stops(&self) -> usize {
        self.stops.iter().filter(|stop| stop.is_late()).count()
    }

    /// Location of the vehicle after the last stop, its start location when empty.
    pub fn end_location<'a>(&self, problem: &'a VehicleRoutingProblem) -> &'a Coordinates {
        match self.stops.last() {
            Some(stop) => problem.order(stop.order_id).location(),
            None => self.vehicle(problem).current_location(),
        }
    }

    pub fn end_time(&self, problem: &VehicleRoutingProblem) -> Timestamp {
        self.stops
            .last()
            .map(|stop| stop.departure_time)
            .unwrap_or_else(|| problem.planning_start())
    }

    fn cursor<'a>(&self, problem: &'a VehicleRoutingProblem) -> ScheduleCursor<'a> {
        ScheduleCursor::new(self.end_location(problem), self.end_time(problem))
    }

    fn schedule_next(&self, problem: &VehicleRoutingProblem, order_id: OrderIdx) -> Stop {
        schedule_stop(problem, self.cursor(problem), order_id, self.stops.len() + 1)
    }

    /// Preview of the stop `order_id` would become if appended to the route.
    pub fn preview_append(&self, problem: &VehicleRoutingProblem, order_id: OrderIdx) -> Stop {
        self.schedule_next(problem, order_id)
    }

    pub fn append(&mut self, problem: &VehicleRoutingProblem, order_id: OrderIdx) {
        let stop = self.schedule_next(problem, order_id);
        self.stops.push(stop);
        self.update_aggregates(problem);
    }

    pub fn swap_stops(&mut self, problem: &VehicleRoutingProblem, first: usize, second: usize) {
        if first == second {
            return;
        }

        self.stops.swap(first, second);
        self.reschedule(problem);
    }

    /// Removes the stop at `from` and inserts it back at `to`.
    pub fn move_stop(&mut self, problem: &VehicleRoutingProblem, from: usize, to: usize) {
        if from == to {
            return;
        }

        let stop = self.stops.remove(from);
        self.stops.insert(to, stop);
        self.reschedule(problem);
    }

    /// Replaces the order served at `position`, returning the previous one.
    pub fn replace_order(
        &mut self,
        problem: &VehicleRoutingProblem,
        position: usize,
        order_id: OrderIdx,
    ) -> OrderIdx {
        let previous = std::mem::replace(&mut self.stops[position].order_id, order_id);
        self.reschedule(problem);
        previous
    }

    /// Recomputes every stop's timing from the vehicle start, in the current
    /// stop order. No feasibility filter is applied.
    pub fn reschedule(&mut self, problem: &VehicleRoutingProblem) {
        let order_ids = self.order_ids().collect::<Vec<_>>();
        self.stops.clear();
        for order_id in order_ids {
            let stop = self.schedule_next(problem, order_id);
            self.stops.push(stop);
        }
        self.update_aggregates(problem);
    }

    fn update_aggregates(&mut self, problem: &VehicleRoutingProblem) {
        let vehicle = problem.vehicle(self.vehicle_id);

        self.total_distance_km = self
            .stops
            .iter()
            .map(|stop| stop.distance_from_previous_km)
            .sum();

        self.total_duration = match self.stops.last() {
            Some(last) => last.departure_time.duration_since(problem.planning_start()),
            None => SignedDuration::ZERO,
        };

        self.total_weight_kg = self
            .stops
            .iter()
            .map(|stop| problem.order(stop.order_id).weight_kg())
            .sum();

        self.fuel_cost = self.total_distance_km * problem.constraints().fuel_cost_per_km;
        self.vehicle_cost = self.total_distance_km * vehicle.cost_per_km();
        self.efficiency = self.stops.len() as f64 / self.total_distance_km.max(1.0);
        self.capacity_utilization = if vehicle.capacity_kg() > 0.0 {
            self.total_weight_kg / vehicle.capacity_kg()
        } else {
            0.0
        };
        self.on_time_deliveries = self.stops.iter().filter(|stop| !stop.is_late()).count();
    }

    pub fn is_overloaded(&self, problem: &VehicleRoutingProblem) -> bool {
        !self.vehicle(problem).can_carry(self.total_weight_kg)
    }
}
