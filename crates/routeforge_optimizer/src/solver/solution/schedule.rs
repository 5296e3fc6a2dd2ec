use std::cmp;

use jiff::{SignedDuration, Timestamp};
use routeforge_matrix::{coordinates::Coordinates, travel_oracle::Travel};

use crate::problem::{
    order::{Order, OrderIdx},
    vehicle_routing_problem::VehicleRoutingProblem,
};

use super::stop::{LATE_PENALTY, Stop};

/// Times past the end of the supported range saturate at `Timestamp::MAX`.
#[inline]
fn saturating_add(timestamp: Timestamp, duration: SignedDuration) -> Timestamp {
    timestamp.checked_add(duration).unwrap_or(Timestamp::MAX)
}

#[inline]
pub fn compute_arrival_time(previous_departure: Timestamp, travel: &Travel) -> Timestamp {
    saturating_add(previous_departure, travel.duration())
}

#[inline]
pub fn compute_waiting_duration(order: &Order, arrival_time: Timestamp) -> SignedDuration {
    order.time_window().waiting_duration(arrival_time)
}

#[inline]
pub fn compute_departure_time(order: &Order, arrival_time: Timestamp) -> Timestamp {
    saturating_add(
        cmp::max(arrival_time, order.time_window().start()),
        order.service_duration(),
    )
}

#[inline]
pub fn compute_late_penalty(order: &Order, arrival_time: Timestamp) -> f64 {
    if order.time_window().is_satisfied(arrival_time) {
        0.0
    } else {
        LATE_PENALTY
    }
}

/// Where and when the vehicle is after serving the previous stop.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleCursor<'a> {
    pub location: &'a Coordinates,
    pub departure_time: Timestamp,
}

impl<'a> ScheduleCursor<'a> {
    pub fn new(location: &'a Coordinates, departure_time: Timestamp) -> Self {
        ScheduleCursor {
            location,
            departure_time,
        }
    }
}

pub fn schedule_stop(
    problem: &VehicleRoutingProblem,
    cursor: ScheduleCursor<'_>,
    order_id: OrderIdx,
    sequence: usize,
) -> Stop {
    let order = problem.order(order_id);
    let travel = problem.travel(cursor.location, order.location());
    let arrival_time = compute_arrival_time(cursor.departure_time, &travel);

    Stop {
        order_id,
        sequence,
        arrival_time,
        departure_time: compute_departure_time(order, arrival_time),
        travel_time: travel.duration(),
        distance_from_previous_km: travel.distance_km,
        waiting_duration: compute_waiting_duration(order, arrival_time),
        late_penalty: compute_late_penalty(order, arrival_time),
    }
}
