use warp::Filter;
use serde_derive::{Deserialize, Serialize};
use std::sync::Arc;
use publisher::{ ConnectionState, DeliveryCounts, EventPublisher };

/// Function that initialises the GET endpoint at the path /health
pub fn init(
    publisher: Arc<EventPublisher>
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {

    warp::path!("health")
        .and(warp::get())
        .map(move || {

            // the API is healthy even when the broker isn't, orders
            // are still being accepted
            let response = Response {
                code: warp::http::StatusCode::OK.as_u16(),
                state: String::from("good"),
                broker: publisher.state(),
                deliveries: publisher.stats(),
            };

            warp::reply::json(&response)

        })
}


/// An API health check response serializable to JSON.
#[derive(Debug, Deserialize, Serialize, Clone)]
struct Response {
    code: u16,
    state: String,
    broker: ConnectionState,
    deliveries: DeliveryCounts,
}
