#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![cfg_attr(test, deny(warnings))]

//! # Entrypoints
//!
//! Entrypoints are the api layer of the order intake service. Right now
//! it contains the following endpoints:
//!
//! - ** GET /health** - ping to see if the API is up and whether the message broker is connected
//! - ** POST /orders** - place a new order. The order is accepted whatever state the broker is in

use log::info;
use warp::Filter;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use std::net::{ Ipv4Addr, SocketAddr };
use std::sync::Arc;
use publisher::EventPublisher;

/// Logic for the API health check endpoint
mod health;

/// Logic for the endpoint that receives new orders
mod order;

/// Logic for generic 4xx -> 5xx responses
mod errors;

/// Definitions for the requests and responses used by the endpoints
mod models;


/// Provides a RESTful web server for placing orders. Returns the address
/// the server is bound to, a sender that shuts the server down gracefully
/// and the handle of the task the server runs in.
pub async fn start(
    publisher: Arc<EventPublisher>,
    max_request_size: u64,
    ip: Ipv4Addr,
    port: u16,
) -> Result<(SocketAddr, oneshot::Sender<()>, JoinHandle<()>), warp::Error> {

    // set up the api endpoints
    let api = endpoints(publisher, max_request_size);

    // view access logs by setting `RUST_LOG=api`.
    let routes = api
        .with(warp::log("api"))
        .recover(errors::reject_request);

    // create a channel that can be used to send a shutdown
    // request to the api server
    let (tx, rx) = oneshot::channel();

    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown((ip.octets(), port), async {
            rx.await.ok();
        })?;

    let server_handle = tokio::task::spawn(server);
    info!(target: "api", "API started at {}", addr);

    Ok((addr, tx, server_handle))

}

/// Initialise all the endpoints
pub fn endpoints(
    publisher: Arc<EventPublisher>,
    max_request_size: u64,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {

    health::init(publisher.clone())
        .or(order::init(publisher, max_request_size))

}
