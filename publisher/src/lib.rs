#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![cfg_attr(test, deny(warnings))]

//! # Publisher
//!
//! The publisher hands accepted orders to the message broker. It owns the
//! broker connection and its view of whether the broker is reachable. It
//! never lets a slow or missing broker hold up an order: every call to
//! the broker is bounded by a timeout and every broker failure turns into
//! a [`DeliveryMode`](domains::DeliveryMode) rather than an error.

/// The `broker` module defines the behaviour every message broker client
/// must provide.
pub mod broker;

/// A broker client that writes to Kafka through a Kafka REST Proxy.
pub mod kafka_rest;

/// The publisher's belief about whether the broker can be reached.
pub mod state;

/// Decides per order whether to go through the broker or fall back.
pub mod event_publisher;

/// Optional background task that reconnects to the broker after it is lost.
pub mod reconnect;

/// Errors raised by broker clients. They never leave this crate's
/// `EventPublisher`.
pub mod errors;

pub use broker::Broker;
pub use errors::BrokerError;
pub use event_publisher::{ DeliveryCounts, EventPublisher, Publish, Timeouts };
pub use kafka_rest::KafkaRest;
pub use reconnect::Backoff;
pub use state::ConnectionState;
