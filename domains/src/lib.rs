#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![cfg_attr(test, deny(warnings))]

//! # Domains
//!
//! The objects that flow through the order intake service and the rules
//! for creating them. An order is only ever created through these rules
//! so the rest of the service can trust that it is well formed.

/// An order is a single purchase intent submitted by a user.
pub mod order;

/// The outcome of trying to hand an order to the message broker.
pub mod delivery;

/// The event written to the message broker when an order is placed.
pub mod events;

/// Errors that can be returned to whoever submitted an order.
pub mod errors;

pub use delivery::{ DeliveryMode, OrderResult };
pub use errors::ValidationError;
pub use events::OrderEvent;
pub use order::{ Order, OrderStatus };
