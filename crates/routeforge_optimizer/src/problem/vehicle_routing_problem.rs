use jiff::Timestamp;
use routeforge_matrix::{
    coordinates::Coordinates,
    travel_oracle::{Travel, TravelOracle},
};

use crate::error::OptimizerError;

use super::{
    constraints::RoutingConstraints,
    order::{Order, OrderIdx},
    vehicle::{Vehicle, VehicleIdx},
};

/// Read-only inputs shared by every individual of the search.
pub struct VehicleRoutingProblem {
    orders: Vec<Order>,
    vehicles: Vec<Vehicle>,
    constraints: RoutingConstraints,
    oracle: TravelOracle,
    planning_start: Timestamp,
}

impl VehicleRoutingProblem {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: OrderIdx) -> &Order {
        &self.orders[order_id]
    }

    pub fn order_ids(&self) -> impl DoubleEndedIterator<Item = OrderIdx> + Clone {
        OrderIdx::all(self.orders.len())
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn vehicle_ids(&self) -> impl DoubleEndedIterator<Item = VehicleIdx> + Clone {
        VehicleIdx::all(self.vehicles.len())
    }

    pub fn constraints(&self) -> &RoutingConstraints {
        &self.constraints
    }

    pub fn oracle(&self) -> &TravelOracle {
        &self.oracle
    }

    pub fn planning_start(&self) -> Timestamp {
        self.planning_start
    }

    pub fn travel(&self, from: &Coordinates, to: &Coordinates) -> Travel {
        self.oracle.travel(from, to)
    }

    /// See [`TravelOracle::use_matrices`], the oracle is unchanged on error.
    pub fn use_matrices(
        &mut self,
        distances_km: Vec<Vec<f64>>,
        times_min: Vec<Vec<f64>>,
        points: &[Coordinates],
    ) -> Result<(), OptimizerError> {
        self.oracle.use_matrices(distances_km, times_min, points)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    orders: Option<Vec<Order>>,
    vehicles: Option<Vec<Vehicle>>,
    constraints: Option<RoutingConstraints>,
    planning_start: Option<Timestamp>,
}

impl VehicleRoutingProblemBuilder {
    pub fn set_orders(&mut self, orders: Vec<Order>) -> &mut VehicleRoutingProblemBuilder {
        self.orders = Some(orders);
        self
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles = Some(vehicles);
        self
    }

    pub fn set_constraints(
        &mut self,
        constraints: RoutingConstraints,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.constraints = Some(constraints);
        self
    }

    pub fn set_planning_start(
        &mut self,
        planning_start: Timestamp,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.planning_start = Some(planning_start);
        self
    }

    pub fn build(self) -> Result<VehicleRoutingProblem, OptimizerError> {
        let orders = self.orders.unwrap_or_default();
        let vehicles = self.vehicles.unwrap_or_default();
        let constraints = self.constraints.unwrap_or_default();

        if let Some(order) = orders.iter().find(|order| !order.time_window().is_valid()) {
            return Err(OptimizerError::InvalidProblem(format!(
                "order {} has a time window ending before it starts",
                order.external_id()
            )));
        }

        if let Some(order) = orders
            .iter()
            .find(|order| order.service_duration().is_negative())
        {
            return Err(OptimizerError::InvalidProblem(format!(
                "order {} has a negative service duration",
                order.external_id()
            )));
        }

        if let Some(order) = orders.iter().find(|order| {
            order
                .time_window()
                .start()
                .checked_add(order.service_duration())
                .is_err()
        }) {
            return Err(OptimizerError::InvalidProblem(format!(
                "order {} ends its service past the supported time range",
                order.external_id()
            )));
        }

        if let Some(vehicle) = vehicles
            .iter()
            .find(|vehicle| vehicle.capacity_kg().is_nan() || vehicle.capacity_kg() < 0.0)
        {
            return Err(OptimizerError::InvalidProblem(format!(
                "vehicle {} has a negative capacity",
                vehicle.external_id()
            )));
        }

        if !constraints.traffic_factor.is_finite() || constraints.traffic_factor <= 0.0 {
            return Err(OptimizerError::InvalidProblem(format!(
                "traffic factor must be positive, got {}",
                constraints.traffic_factor
            )));
        }

        Ok(VehicleRoutingProblem {
            oracle: TravelOracle::new(constraints.traffic_factor),
            planning_start: self.planning_start.unwrap_or_else(Timestamp::now),
            orders,
            vehicles,
            constraints,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::time_window::{TimeWindow, TimeWindowBuilder},
        test_utils,
    };

    use super::*;

    #[test]
    fn test_rejects_inverted_time_window() {
        let mut order = test_utils::OrderParams::at(50.0, 4.0);
        order.time_window = Some(TimeWindow::new(
            test_utils::at_time("12:00"),
            test_utils::at_time("10:00"),
        ));

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder.set_orders(vec![test_utils::create_order(0, order)]);

        assert!(matches!(
            builder.build(),
            Err(OptimizerError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_rejects_service_past_end_of_time_range() {
        let mut order = test_utils::OrderParams::at(50.0, 4.0);
        order.time_window = Some(
            TimeWindowBuilder::default()
                .with_start("9999-12-30T00:00:00Z".parse().unwrap())
                .build(),
        );
        order.service_minutes = 100 * 60;

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder.set_orders(vec![test_utils::create_order(0, order)]);

        assert!(matches!(
            builder.build(),
            Err(OptimizerError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_rejects_negative_service_duration() {
        let mut order = test_utils::OrderParams::at(50.0, 4.0);
        order.service_minutes = -15;

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder.set_orders(vec![test_utils::create_order(0, order)]);

        assert!(matches!(
            builder.build(),
            Err(OptimizerError::InvalidProblem(message)) if message.contains("negative service")
        ));
    }

    #[test]
    fn test_rejects_infinite_traffic_factor() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder.set_constraints(RoutingConstraints {
            traffic_factor: f64::INFINITY,
            ..RoutingConstraints::default()
        });

        assert!(builder.build().is_err());
    }

    #[test]
    fn test_use_matrices_mismatch() {
        let mut problem = test_utils::create_test_problem(vec![], vec![]);
        let points = vec![
            Coordinates::new(50.0, 4.0),
            Coordinates::new(50.1, 4.0),
            Coordinates::new(50.2, 4.0),
            Coordinates::new(50.3, 4.0),
        ];

        let result = problem.use_matrices(vec![vec![0.0; 4]; 3], vec![vec![0.0; 4]; 4], &points);

        assert!(matches!(result, Err(OptimizerError::Matrix(_))));
        assert!(!problem.oracle().has_matrices());
    }
}
