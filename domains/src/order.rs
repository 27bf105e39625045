use serde_derive::{ Deserialize, Serialize };
use std::sync::atomic::{ AtomicU64, Ordering };
use crate::errors::ValidationError;

/// Source of order ids. Ids are unique for the lifetime of the process only.
static NEXT_ORDER_ID: AtomicU64 = AtomicU64::new(1);


/// Where an order is in its lifecycle. The intake service only creates
/// pending orders, other systems move them on from there.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {

    /// Accepted but not yet processed downstream.
    Pending,

}


/// A single purchase intent. Immutable once created.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all="camelCase")]
pub struct Order {

    /// Generated when the order is created, never derived from the input.
    id: u64,

    /// The catalog entry being bought. Not checked against a catalog.
    product_id: String,

    /// The user placing the order. Not checked against a user service.
    user_id: String,

    /// Always pending when created by this service.
    status: OrderStatus,

}

impl Order {

    /// Create a new pending Order. Fails if either identifier is missing,
    /// which includes empty or whitespace-only strings.
    pub fn new(
        product_id: Option<String>,
        user_id: Option<String>
    ) -> Result<Order, ValidationError> {

        let product_id = required(product_id, "productId")?;
        let user_id = required(user_id, "userId")?;

        Ok(Order {
            id: NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed),
            product_id,
            user_id,
            status: OrderStatus::Pending,
        })

    }

    /// Getter for the id field
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Getter for the product_id field
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Getter for the user_id field
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Getter for the status field
    pub fn status(&self) -> OrderStatus {
        self.status
    }

}


fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {

    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }

}
