use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while talking to a message broker
#[derive(Error, Debug)]
pub enum BrokerError {

    /// The broker could not be reached or refused the connection
    #[error("failed to connect to the broker: {0}")]
    Connect(String),

    /// The broker did not accept a message
    #[error("failed to publish to the broker: {0}")]
    Publish(String),

    /// The broker did not answer in time
    #[error("the broker did not respond within {0:?}")]
    Timeout(Duration),

    /// The message could not be turned into json
    #[error("failed to serialize the message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The broker address in the config is not a valid url
    #[error("invalid broker url {url}: {reason}")]
    InvalidUrl {
        /// The url as written in the config
        url: String,
        /// Why it could not be parsed
        reason: String,
    },

}
