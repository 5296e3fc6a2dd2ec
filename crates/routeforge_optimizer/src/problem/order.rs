use jiff::SignedDuration;
use routeforge_matrix::coordinates::Coordinates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    define_index_newtype,
    problem::time_window::{TimeWindow, TimeWindowBuilder},
};

define_index_newtype!(OrderIdx, Order);

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Weight used by the route constructor when ranking candidate orders.
    pub fn weight(&self) -> f64 {
        match self {
            Priority::Urgent => 1.0,
            Priority::High => 0.8,
            Priority::Medium => 0.6,
            Priority::Low => 0.4,
        }
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    /// Weight of a single unit, in kilograms
    pub unit_weight_kg: f64,
}

impl OrderItem {
    pub fn weight_kg(&self) -> f64 {
        self.quantity as f64 * self.unit_weight_kg
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    external_id: String,
    customer_id: String,
    location: Coordinates,
    items: Vec<OrderItem>,
    time_window: TimeWindow,
    priority: Priority,
    service_duration: SignedDuration,
    weight_kg: f64,
}

impl Order {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn location(&self) -> &Coordinates {
        &self.location
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn service_duration(&self) -> SignedDuration {
        self.service_duration
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }
}

#[derive(Default)]
pub struct OrderBuilder {
    external_id: Option<String>,
    customer_id: Option<String>,
    location: Option<Coordinates>,
    items: Vec<OrderItem>,
    time_window: Option<TimeWindow>,
    priority: Option<Priority>,
    service_duration: Option<SignedDuration>,
}

impl OrderBuilder {
    pub fn set_external_id(&mut self, external_id: String) -> &mut OrderBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_customer_id(&mut self, customer_id: String) -> &mut OrderBuilder {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn set_location(&mut self, location: Coordinates) -> &mut OrderBuilder {
        self.location = Some(location);
        self
    }

    pub fn add_item(&mut self, item: OrderItem) -> &mut OrderBuilder {
        self.items.push(item);
        self
    }

    pub fn set_items(&mut self, items: Vec<OrderItem>) -> &mut OrderBuilder {
        self.items = items;
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut OrderBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut OrderBuilder {
        self.priority = Some(priority);
        self
    }

    pub fn set_service_duration(&mut self, duration: SignedDuration) -> &mut OrderBuilder {
        self.service_duration = Some(duration);
        self
    }

    pub fn build(self) -> Order {
        let weight_kg = self.items.iter().map(OrderItem::weight_kg).sum();

        Order {
            external_id: self.external_id.unwrap_or_default(),
            customer_id: self.customer_id.unwrap_or_default(),
            location: self.location.unwrap_or(Coordinates::new(0.0, 0.0)),
            items: self.items,
            time_window: self
                .time_window
                .unwrap_or_else(|| TimeWindowBuilder::default().build()),
            priority: self.priority.unwrap_or_default(),
            service_duration: self.service_duration.unwrap_or(SignedDuration::ZERO),
            weight_kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_is_sum_of_items() {
        let mut builder = OrderBuilder::default();
        builder
            .add_item(OrderItem {
                product_id: "apples".to_owned(),
                quantity: 3,
                unit_weight_kg: 1.5,
            })
            .add_item(OrderItem {
                product_id: "flour".to_owned(),
                quantity: 2,
                unit_weight_kg: 5.0,
            });

        let order = builder.build();

        assert_eq!(order.weight_kg(), 14.5);
        assert_eq!(order.priority(), Priority::Medium);
    }

    #[test]
    fn test_priority_weights_are_ordered() {
        assert!(Priority::Urgent.weight() > Priority::High.weight());
        assert!(Priority::High.weight() > Priority::Medium.weight());
        assert!(Priority::Medium.weight() > Priority::Low.weight());
    }
}
