use crate::problem::vehicle_routing_problem::VehicleRoutingProblem;

pub struct MutationContext<'a, R> {
    pub problem: &'a VehicleRoutingProblem,
    pub rng: &'a mut R,
}
