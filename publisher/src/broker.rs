use async_trait::async_trait;
use serde_json::Value;
use crate::errors::BrokerError;

/// Defines the shared behaviour for all message broker clients.
///
/// Implementations don't need to enforce their own timeouts, the
/// `EventPublisher` wraps every call in one. They must however be safe to
/// drop mid-call since that is how a timeout cancels them.
#[async_trait]
pub trait Broker: std::fmt::Debug + Send + Sync {

    /// Check the broker can be reached and is ready to take messages
    async fn connect(&self) -> Result<(), BrokerError>;

    /// Write one message to the broker, partitioned by `key`
    async fn send(&self, key: &str, payload: &Value) -> Result<(), BrokerError>;

    /// Release any resources held by the client
    async fn close(&self) -> Result<(), BrokerError>;

}
