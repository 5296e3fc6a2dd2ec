use jiff::{SignedDuration, Timestamp};
use routeforge_matrix::coordinates::Coordinates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::OptimizerError,
    problem::{
        constraints::RoutingConstraints,
        order::{Order, OrderBuilder, OrderItem, Priority},
        time_window::TimeWindowBuilder,
        vehicle::{Vehicle, VehicleBuilder, VehicleType},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::{
        fitness::FitnessScore,
        solution::{route::Route, solution::Solution, stop::Stop},
        solver::Solver,
        solver_params::GaParams,
    },
};

pub trait FromProblem<T> {
    fn from_problem(value: T, problem: &VehicleRoutingProblem) -> Self;
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "OptimizationRequest")]
pub struct JsonOptimizationRequest {
    pub orders: Vec<JsonOrder>,
    pub vehicles: Vec<JsonVehicle>,
    pub constraints: Option<RoutingConstraints>,
    pub params: Option<GaParams>,

    /// Departure time of every vehicle, defaults to now
    pub planning_start: Option<Timestamp>,

    /// Pre-computed travel matrices, haversine estimates are used otherwise
    pub matrices: Option<JsonMatrices>,
}

#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Order")]
pub struct JsonOrder {
    pub id: String,
    pub customer_id: Option<String>,
    pub location: Coordinates,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub time_window: Option<JsonTimeWindow>,
    pub priority: Option<Priority>,
    pub service_duration: Option<SignedDuration>,
}

impl From<&JsonOrder> for Order {
    fn from(value: &JsonOrder) -> Self {
        let mut builder = OrderBuilder::default();
        builder
            .set_external_id(value.id.clone())
            .set_customer_id(value.customer_id.clone().unwrap_or_default())
            .set_location(value.location)
            .set_items(value.items.clone());

        if let Some(time_window) = &value.time_window {
            let mut time_window_builder = TimeWindowBuilder::default();
            if let Some(start) = time_window.start {
                time_window_builder = time_window_builder.with_start(start);
            }
            if let Some(end) = time_window.end {
                time_window_builder = time_window_builder.with_end(end);
            }
            builder.set_time_window(time_window_builder.build());
        }

        if let Some(priority) = value.priority {
            builder.set_priority(priority);
        }

        if let Some(service_duration) = value.service_duration {
            builder.set_service_duration(service_duration);
        }

        builder.build()
    }
}

/// A missing bound leaves that side of the window open.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "TimeWindow")]
pub struct JsonTimeWindow {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct JsonVehicle {
    pub id: String,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub capacity_kg: f64,
    pub max_distance_km: Option<f64>,
    pub driver_id: Option<String>,
    pub current_location: Coordinates,
    pub available_hours: Option<f64>,
    pub cost_per_km: Option<f64>,
}

impl From<&JsonVehicle> for Vehicle {
    fn from(value: &JsonVehicle) -> Self {
        let mut builder = VehicleBuilder::default();
        builder
            .set_vehicle_id(value.id.clone())
            .set_capacity_kg(value.capacity_kg)
            .set_current_location(value.current_location)
            .set_cost_per_km(value.cost_per_km.unwrap_or(0.0));

        if let Some(vehicle_type) = value.vehicle_type {
            builder.set_vehicle_type(vehicle_type);
        }
        if let Some(max_distance_km) = value.max_distance_km {
            builder.set_max_distance_km(max_distance_km);
        }
        if let Some(driver_id) = &value.driver_id {
            builder.set_driver_id(driver_id.clone());
        }
        if let Some(available_hours) = value.available_hours {
            builder.set_available_hours(available_hours);
        }

        builder.build()
    }
}

/// Square matrices indexed like `points`.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "TravelMatrices")]
pub struct JsonMatrices {
    pub distance_km: Vec<Vec<f64>>,
    pub time_min: Vec<Vec<f64>>,
    pub points: Vec<Coordinates>,
}

impl JsonOptimizationRequest {
    pub fn build_problem(&self) -> Result<VehicleRoutingProblem, OptimizerError> {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_orders(self.orders.iter().map(Order::from).collect())
            .set_vehicles(self.vehicles.iter().map(Vehicle::from).collect())
            .set_constraints(self.constraints.clone().unwrap_or_default());

        if let Some(planning_start) = self.planning_start {
            builder.set_planning_start(planning_start);
        }

        builder.build()
    }

    /// Builds the solver, applying the travel matrices up front so that a
    /// dimension mismatch is reported before any optimization.
    #[instrument(skip_all)]
    pub fn build_solver(self) -> Result<Solver, OptimizerError> {
        let problem = self.build_problem()?;
        let mut solver = Solver::new(problem, self.params.unwrap_or_default());

        if let Some(JsonMatrices {
            distance_km,
            time_min,
            points,
        }) = self.matrices
        {
            solver.use_matrices(distance_km, time_min, &points)?;
        }

        Ok(solver)
    }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Solution")]
pub struct JsonSolution {
    pub routes: Vec<JsonRoute>,
    pub unassigned: Vec<String>,
    pub assigned_orders: usize,
    pub total_distance_km: f64,
    pub total_duration: SignedDuration,
    pub total_fuel_cost: f64,
    pub total_vehicle_cost: f64,
    pub score: FitnessScore,
}

impl FromProblem<&Solution> for JsonSolution {
    fn from_problem(value: &Solution, problem: &VehicleRoutingProblem) -> Self {
        JsonSolution {
            routes: value
                .routes()
                .iter()
                .map(|route| JsonRoute::from_problem(route, problem))
                .collect(),
            unassigned: value
                .unassigned()
                .iter()
                .map(|&order_id| problem.order(order_id).external_id().to_owned())
                .collect(),
            assigned_orders: value.assigned_orders(),
            total_distance_km: value.total_distance_km(),
            total_duration: value.total_duration(),
            total_fuel_cost: value.total_fuel_cost(),
            total_vehicle_cost: value.total_vehicle_cost(),
            score: *value.score(),
        }
    }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Route")]
pub struct JsonRoute {
    pub vehicle_id: String,
    pub driver_id: Option<String>,
    pub stops: Vec<JsonStop>,
    pub total_distance_km: f64,
    pub total_duration: SignedDuration,
    pub total_weight_kg: f64,
    pub fuel_cost: f64,
    pub vehicle_cost: f64,
    pub efficiency: f64,
    pub capacity_utilization: f64,
    pub on_time_deliveries: usize,
}

impl FromProblem<&Route> for JsonRoute {
    fn from_problem(value: &Route, problem: &VehicleRoutingProblem) -> Self {
        let vehicle = value.vehicle(problem);
        JsonRoute {
            vehicle_id: vehicle.external_id().to_owned(),
            driver_id: vehicle.driver_id().map(str::to_owned),
            stops: value
                .stops()
                .iter()
                .map(|stop| JsonStop::from_problem(stop, problem))
                .collect(),
            total_distance_km: value.total_distance_km(),
            total_duration: value.total_duration(),
            total_weight_kg: value.total_weight_kg(),
            fuel_cost: value.fuel_cost(),
            vehicle_cost: value.vehicle_cost(),
            efficiency: value.efficiency(),
            capacity_utilization: value.capacity_utilization(),
            on_time_deliveries: value.on_time_deliveries(),
        }
    }
}

#[derive(Serialize, JsonSchema)]
#[serde(rename = "Stop")]
pub struct JsonStop {
    pub order_id: String,
    pub sequence: usize,
    pub arrival_time: Timestamp,
    pub departure_time: Timestamp,
    pub travel_time: SignedDuration,
    pub distance_from_previous_km: f64,
    pub waiting_duration: SignedDuration,
    pub late_penalty: f64,
}

impl FromProblem<&Stop> for JsonStop {
    fn from_problem(value: &Stop, problem: &VehicleRoutingProblem) -> Self {
        JsonStop {
            order_id: problem.order(value.order_id()).external_id().to_owned(),
            sequence: value.sequence(),
            arrival_time: value.arrival_time(),
            departure_time: value.departure_time(),
            travel_time: value.travel_time(),
            distance_from_previous_km: value.distance_from_previous_km(),
            waiting_duration: value.waiting_duration(),
            late_penalty: value.late_penalty(),
        }
    }
}
