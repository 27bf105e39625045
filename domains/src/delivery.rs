use serde_derive::{ Deserialize, Serialize };
use std::fmt;
use crate::order::Order;


/// How an order left the intake service.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
pub enum DeliveryMode {

    /// The broker accepted the order event.
    Queued,

    /// The broker was known to be unreachable so it was never contacted.
    /// The order was still accepted.
    Direct,

    /// The broker was believed reachable but the publish failed or timed
    /// out. The order was still accepted.
    Degraded,

}

impl fmt::Display for DeliveryMode {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {

        let name = match self {
            DeliveryMode::Queued => "QUEUED",
            DeliveryMode::Direct => "DIRECT",
            DeliveryMode::Degraded => "DEGRADED",
        };

        write!(f, "{}", name)

    }

}


/// What the caller gets back after placing an order. Serializes as a flat
/// object: `{id, productId, userId, status, deliveryMode}`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all="camelCase")]
pub struct OrderResult {

    /// The order that was accepted.
    #[serde(flatten)]
    pub order: Order,

    /// Whether downstream processing of the order is guaranteed.
    pub delivery_mode: DeliveryMode,

}
