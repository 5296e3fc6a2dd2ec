use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RoutingConstraints {
    pub max_route_duration_hours: f64,
    pub max_stops_per_vehicle: usize,
    pub break_duration_minutes: f64,
    pub fuel_cost_per_km: f64,
    pub traffic_factor: f64,
}

impl Default for RoutingConstraints {
    fn default() -> Self {
        RoutingConstraints {
            max_route_duration_hours: 8.0,
            max_stops_per_vehicle: 25,
            break_duration_minutes: 30.0,
            fuel_cost_per_km: 0.12,
            traffic_factor: 1.0,
        }
    }
}

impl RoutingConstraints {
    /// Saturates at `SignedDuration::MAX` when the limit does not fit.
    pub fn max_route_duration(&self) -> SignedDuration {
        SignedDuration::try_from_secs_f64(self.max_route_duration_hours * 3600.0)
            .unwrap_or(SignedDuration::MAX)
    }
}
