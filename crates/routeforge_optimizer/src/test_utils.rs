use jiff::{SignedDuration, Timestamp};
use routeforge_matrix::coordinates::Coordinates;

use crate::{
    problem::{
        constraints::RoutingConstraints,
        order::{Order, OrderBuilder, OrderIdx, OrderItem, Priority},
        time_window::TimeWindow,
        vehicle::{Vehicle, VehicleBuilder},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::solution::route::Route,
};

pub const PLANNING_DATE: &str = "2025-06-10";

/// Time of day on the planning date, in UTC.
pub fn at_time(time: &str) -> Timestamp {
    format!("{PLANNING_DATE}T{time}:00Z").parse().unwrap()
}

pub fn planning_start() -> Timestamp {
    at_time("08:00")
}

pub fn full_day() -> TimeWindow {
    TimeWindow::new(at_time("00:00"), at_time("23:59"))
}

pub struct OrderParams {
    pub lat: f64,
    pub lng: f64,
    pub weight_kg: f64,
    pub time_window: Option<TimeWindow>,
    pub priority: Priority,
    pub service_minutes: i64,
}

impl OrderParams {
    pub fn at(lat: f64, lng: f64) -> Self {
        OrderParams {
            lat,
            lng,
            weight_kg: 10.0,
            time_window: None,
            priority: Priority::Medium,
            service_minutes: 0,
        }
    }
}

pub fn create_order(index: usize, params: OrderParams) -> Order {
    let mut builder = OrderBuilder::default();
    builder
        .set_external_id(index.to_string())
        .set_customer_id(format!("customer-{index}"))
        .set_location(Coordinates::new(params.lat, params.lng))
        .add_item(OrderItem {
            product_id: "parcel".to_owned(),
            quantity: 1,
            unit_weight_kg: params.weight_kg,
        })
        .set_time_window(params.time_window.unwrap_or_else(full_day))
        .set_priority(params.priority)
        .set_service_duration(SignedDuration::from_mins(params.service_minutes));
    builder.build()
}

pub fn create_vehicle(index: usize, lat: f64, lng: f64, capacity_kg: f64) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder
        .set_vehicle_id(format!("vehicle-{index}"))
        .set_driver_id(format!("driver-{index}"))
        .set_capacity_kg(capacity_kg)
        .set_current_location(Coordinates::new(lat, lng))
        .set_cost_per_km(0.5);
    builder.build()
}

/// Loose limits so that only the property under test produces violations.
pub fn test_constraints() -> RoutingConstraints {
    RoutingConstraints {
        max_stops_per_vehicle: 50,
        max_route_duration_hours: 24.0,
        ..RoutingConstraints::default()
    }
}

pub fn create_test_problem(orders: Vec<Order>, vehicles: Vec<Vehicle>) -> VehicleRoutingProblem {
    create_test_problem_with_constraints(orders, vehicles, test_constraints())
}

pub fn create_test_problem_with_constraints(
    orders: Vec<Order>,
    vehicles: Vec<Vehicle>,
    constraints: RoutingConstraints,
) -> VehicleRoutingProblem {
    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_orders(orders)
        .set_vehicles(vehicles)
        .set_constraints(constraints)
        .set_planning_start(planning_start());
    builder.build().unwrap()
}

pub fn create_route(problem: &VehicleRoutingProblem, vehicle: usize, orders: Vec<usize>) -> Route {
    Route::new(
        problem,
        vehicle.into(),
        orders.into_iter().map(OrderIdx::new),
    )
}

/// `rows * cols` orders of 10 kg spaced by 0.01 degree, every vehicle starts at the grid corner.
pub fn create_grid_problem(
    rows: usize,
    cols: usize,
    vehicles: usize,
    capacity_kg: f64,
) -> VehicleRoutingProblem {
    let orders = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .enumerate()
        .map(|(index, (row, col))| {
            create_order(
                index,
                OrderParams::at(50.0 + row as f64 * 0.01, 4.0 + col as f64 * 0.01),
            )
        })
        .collect();
    let vehicles = (0..vehicles)
        .map(|index| create_vehicle(index, 50.0, 4.0, capacity_kg))
        .collect();

    create_test_problem(orders, vehicles)
}
