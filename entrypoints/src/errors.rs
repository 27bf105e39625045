use std::convert::Infallible;
use std::error::Error;
use warp::{reject, Rejection};
use serde_derive::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::filters::body::BodyDeserializeError;
use log::error;

pub async fn reject_request(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {

        code = StatusCode::NOT_FOUND;
        message = String::from("Sorry, the endpoint you made a request to does not exist.");

    } else if let Some(e) = err.find::<BodyDeserializeError>() {

        code = StatusCode::BAD_REQUEST;
        message = body_deserialize_error(e);

    } else if err.find::<reject::PayloadTooLarge>().is_some() {

        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = String::from("Sorry, your request body is larger than this API accepts.");

    } else if err.find::<reject::LengthRequired>().is_some() {

        code = StatusCode::LENGTH_REQUIRED;
        message = String::from("Sorry, your request needs a content-length header.");

    } else if err.find::<reject::UnsupportedMediaType>().is_some() {

        code = StatusCode::UNSUPPORTED_MEDIA_TYPE;
        message = String::from("Sorry, this endpoint only accepts json request bodies.");

    } else if err.find::<reject::MethodNotAllowed>().is_some() {

        code = StatusCode::METHOD_NOT_ALLOWED;
        message = String::from("Sorry, the HTTP method you used isn't allowed on this endpoint.");

    } else {

        error!(target: "api", "Unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = String::from("Sorry, it looks like something unexpected went wrong so this error message can't give you any further details.");

    }

    let json = warp::reply::json(&ErrorMessage::new(code, message));

    Ok(warp::reply::with_status(json, code))

}


/// When the body of a request could not be deserialized correctly, call this
/// function to generate a error message to help the user get it right next time
fn body_deserialize_error(err: &BodyDeserializeError) -> String {

    match err.source() {
        Some(cause) => format!("Your request body could not be read: {}", cause),
        None => String::from("BAD_REQUEST"),
    }

}


/// An API error response serializable to JSON.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorMessage {
    code: u16,
    message: String,
}

impl ErrorMessage {

    pub fn new(code: StatusCode, message: String) -> ErrorMessage {
        ErrorMessage { code: code.as_u16(), message }
    }

}
