use serde_derive::{ Deserialize, Serialize };
use time::OffsetDateTime;
use uuid::Uuid;
use crate::order::Order;


/// The message written to the broker when an order has been accepted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all="snake_case")]
pub struct OrderEvent {

    /// Will always equal "ORDER_PLACED".
    event_type: String,

    /// The order that was placed.
    order: Order,

    /// The time and date when this event was created.
    #[serde(with="time::serde::rfc3339")]
    created_at: OffsetDateTime,

    /// The unique identifier of this event. Consumers can use it to
    /// ignore duplicates.
    event_id: Uuid,

}

impl OrderEvent {

    /// Wrap an order in a new event
    pub fn placed(order: &Order) -> OrderEvent {

        OrderEvent {
            event_type: "ORDER_PLACED".to_string(),
            order: order.clone(),
            created_at: OffsetDateTime::now_utc(),
            event_id: Uuid::new_v4(),
        }

    }

    /// The key the broker should partition this event by
    pub fn key(&self) -> String {
        self.order.id().to_string()
    }

    /// Getter for the event_type field
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Getter for the order field
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Getter for the event_id field
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

}
