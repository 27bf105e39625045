#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![cfg_attr(test, deny(warnings))]

//! # Handlers
//!
//! Handlers are the functions the API calls to carry out a request. They
//! are purely logic and don't own any connections or storage themselves,
//! those are passed in.

/// This module is responsible for accepting new orders and handing them
/// to the publisher.
pub mod order;
