use jiff::{SignedDuration, Timestamp};

use crate::problem::order::OrderIdx;

/// Penalty recorded on a stop reached after its time window closed.
pub const LATE_PENALTY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub(super) order_id: OrderIdx,
    /// 1-based position in the route
    pub(super) sequence: usize,
    pub(super) arrival_time: Timestamp,
    pub(super) departure_time: Timestamp,
    pub(super) travel_time: SignedDuration,
    pub(super) distance_from_previous_km: f64,
    pub(super) waiting_duration: SignedDuration,
    pub(super) late_penalty: f64,
}

impl Stop {
    pub fn order_id(&self) -> OrderIdx {
        self.order_id
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    pub fn departure_time(&self) -> Timestamp {
        self.departure_time
    }

    pub fn travel_time(&self) -> SignedDuration {
        self.travel_time
    }

    pub fn distance_from_previous_km(&self) -> f64 {
        self.distance_from_previous_km
    }

    pub fn waiting_duration(&self) -> SignedDuration {
        self.waiting_duration
    }

    pub fn late_penalty(&self) -> f64 {
        self.late_penalty
    }

    pub fn is_late(&self) -> bool {
        self.late_penalty > 0.0
    }
}
