use routeforge_matrix::coordinates::Coordinates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::define_index_newtype;

define_index_newtype!(VehicleIdx, Vehicle);

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Motorcycle,
    Car,
    #[default]
    Van,
    Truck,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    external_id: String,
    vehicle_type: VehicleType,
    capacity_kg: f64,
    max_distance_km: Option<f64>,
    driver_id: Option<String>,
    current_location: Coordinates,
    available_hours: Option<f64>,
    cost_per_km: f64,
}

impl Vehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn capacity_kg(&self) -> f64 {
        self.capacity_kg
    }

    pub fn max_distance_km(&self) -> Option<f64> {
        self.max_distance_km
    }

    pub fn driver_id(&self) -> Option<&str> {
        self.driver_id.as_deref()
    }

    pub fn current_location(&self) -> &Coordinates {
        &self.current_location
    }

    pub fn available_hours(&self) -> Option<f64> {
        self.available_hours
    }

    pub fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }

    pub fn can_carry(&self, weight_kg: f64) -> bool {
        weight_kg <= self.capacity_kg
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    external_id: Option<String>,
    vehicle_type: Option<VehicleType>,
    capacity_kg: Option<f64>,
    max_distance_km: Option<f64>,
    driver_id: Option<String>,
    current_location: Option<Coordinates>,
    available_hours: Option<f64>,
    cost_per_km: Option<f64>,
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, external_id: String) -> &mut VehicleBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_vehicle_type(&mut self, vehicle_type: VehicleType) -> &mut VehicleBuilder {
        self.vehicle_type = Some(vehicle_type);
        self
    }

    pub fn set_capacity_kg(&mut self, capacity_kg: f64) -> &mut VehicleBuilder {
        self.capacity_kg = Some(capacity_kg);
        self
    }

    pub fn set_max_distance_km(&mut self, max_distance_km: f64) -> &mut VehicleBuilder {
        self.max_distance_km = Some(max_distance_km);
        self
    }

    pub fn set_driver_id(&mut self, driver_id: String) -> &mut VehicleBuilder {
        self.driver_id = Some(driver_id);
        self
    }

    pub fn set_current_location(&mut self, location: Coordinates) -> &mut VehicleBuilder {
        self.current_location = Some(location);
        self
    }

    pub fn set_available_hours(&mut self, available_hours: f64) -> &mut VehicleBuilder {
        self.available_hours = Some(available_hours);
        self
    }

    pub fn set_cost_per_km(&mut self, cost_per_km: f64) -> &mut VehicleBuilder {
        self.cost_per_km = Some(cost_per_km);
        self
    }

    pub fn build(self) -> Vehicle {
        Vehicle {
            external_id: self.external_id.unwrap_or_default(),
            vehicle_type: self.vehicle_type.unwrap_or_default(),
            capacity_kg: self.capacity_kg.unwrap_or(0.0),
            max_distance_km: self.max_distance_km,
            driver_id: self.driver_id,
            current_location: self.current_location.unwrap_or(Coordinates::new(0.0, 0.0)),
            available_hours: self.available_hours,
            cost_per_km: self.cost_per_km.unwrap_or(0.0),
        }
    }
}
