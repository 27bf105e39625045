use publisher::BrokerError;
use thiserror::Error;

/// Everything that stops the service from starting
#[derive(Error, Debug)]
pub enum StartupError {

    /// The config file exists but isn't valid
    #[error("got error while trying to parse {path}: {source}")]
    Config {
        /// Where the config file was read from
        path: String,
        /// What was wrong with it
        #[source]
        source: toml::de::Error,
    },

    /// The broker settings can't be used to build a client
    #[error(transparent)]
    Broker(#[from] BrokerError),

    /// The API could not bind to its address
    #[error("the API failed to start: {0}")]
    Api(#[from] warp::Error),

}
