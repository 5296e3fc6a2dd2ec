use geo::{Distance, Haversine};

use crate::coordinates::Coordinates;

/// Minutes of driving per kilometer before applying the traffic factor.
pub const MINUTES_PER_KM: f64 = 2.0;

pub fn haversine_km(from: &Coordinates, to: &Coordinates) -> f64 {
    Haversine.distance(geo::Point::from(from), geo::Point::from(to)) / 1000.0
}

pub fn estimated_time_min(distance_km: f64, traffic_factor: f64) -> f64 {
    distance_km * MINUTES_PER_KM * traffic_factor
}
