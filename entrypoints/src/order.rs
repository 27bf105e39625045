use warp::{ Filter, reply };
use warp::http::StatusCode;
use std::convert::Infallible;
use std::sync::Arc;
use handlers::order::submit_order;
use publisher::EventPublisher;
use crate::errors::ErrorMessage;
use crate::models::OrderRequest;

/// Function that initialises the POST endpoint at the path /orders
pub fn init(
    publisher: Arc<EventPublisher>,
    max_request_size: u64,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {

    warp::path!("orders")
        .and(warp::post())
        .and(warp::body::content_length_limit(max_request_size))
        .and(warp::body::json())
        .and(warp::any().map(move || publisher.clone()))
        .and_then(place_order)

}


/// Accept the order and respond with it and how it was delivered. Only a
/// missing field is a bad request, a broker problem still gets a 201.
async fn place_order(
    request: OrderRequest,
    publisher: Arc<EventPublisher>
) -> Result<reply::WithStatus<reply::Json>, Infallible> {

    match submit_order(publisher.as_ref(), request.product_id, request.user_id).await {

        Ok(result) => Ok(reply::with_status(
            reply::json(&result),
            StatusCode::CREATED
        )),

        Err(error) => Ok(reply::with_status(
            reply::json(&ErrorMessage::new(StatusCode::BAD_REQUEST, error.to_string())),
            StatusCode::BAD_REQUEST
        ))

    }

}
