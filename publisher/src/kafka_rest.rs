//! # KafkaRest
//!
//! Writes order events to a Kafka topic through a Kafka REST Proxy using
//! its v2 api. The proxy is stateless over HTTP so "connecting" means
//! checking the proxy answers and that the topic exists.

use async_trait::async_trait;
use log::debug;
use reqwest::{ header, RequestBuilder, Response, Url };
use serde_derive::Deserialize;
use serde_json::{ json, Value };
use crate::broker::Broker;
use crate::errors::BrokerError;

const KAFKA_JSON_V2: &str = "application/vnd.kafka.json.v2+json";
const KAFKA_V2: &str = "application/vnd.kafka.v2+json";


/// A broker client for the Kafka REST Proxy
#[derive(Debug, Clone)]
pub struct KafkaRest {

    /// Shared http client, cheap to clone
    client: reqwest::Client,

    /// The root url of the proxy
    url: Url,

    /// The topic order events are written to
    topic: String,

    /// Optional username and password for the proxy
    basic_auth: Option<(String, String)>,

}

impl KafkaRest {

    /// Create a client for the proxy at `url` writing to `topic`
    pub fn new(url: &str, topic: &str) -> Result<KafkaRest, BrokerError> {

        let url = Url::parse(url).map_err(|e| BrokerError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(KafkaRest {
            client: reqwest::Client::new(),
            url,
            topic: topic.to_string(),
            basic_auth: None,
        })

    }

    /// Add a basic (username-password) header to every request
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> KafkaRest {

        self.basic_auth = Some((username.to_string(), password.to_string()));
        self

    }

    /// The proxy endpoint for the configured topic
    pub fn topic_url(&self) -> String {

        format!("{}/topics/{}", self.url.as_str().trim_end_matches('/'), self.topic)

    }

    fn add_auth(&self, req: RequestBuilder) -> RequestBuilder {

        match &self.basic_auth {
            Some((username, password)) => req.basic_auth(username, Some(password)),
            None => req,
        }

    }

}


/// The body the proxy returns after producing records
#[derive(Debug, Deserialize)]
struct ProduceResponse {
    #[serde(default)]
    offsets: Vec<PartitionOffset>,
}

#[derive(Debug, Deserialize)]
struct PartitionOffset {
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}


#[async_trait]
impl Broker for KafkaRest {

    async fn connect(&self) -> Result<(), BrokerError> {

        let req = self.client
            .get(self.topic_url())
            .header(header::ACCEPT, KAFKA_V2);

        let resp = self.add_auth(req)
            .send()
            .await
            .map_err(|e| BrokerError::Connect(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BrokerError::Connect(format!(
                "proxy answered {} for topic {}", resp.status(), self.topic
            )));
        }

        debug!(target: "publisher", "Kafka REST Proxy at {} has topic {}.", self.url, self.topic);
        Ok(())

    }

    async fn send(&self, key: &str, payload: &Value) -> Result<(), BrokerError> {

        let body = json!({
            "records": [
                { "key": key, "value": payload }
            ]
        });

        let req = self.client
            .post(self.topic_url())
            .header(header::CONTENT_TYPE, KAFKA_JSON_V2)
            .header(header::ACCEPT, KAFKA_V2)
            .body(body.to_string());

        let resp = self.add_auth(req)
            .send()
            .await
            .map_err(|e| BrokerError::Publish(e.to_string()))?;

        check_produce_response(resp).await

    }

    async fn close(&self) -> Result<(), BrokerError> {
        Ok(())
    }

}


/// The proxy can answer 200 and still report a failure per record
async fn check_produce_response(resp: Response) -> Result<(), BrokerError> {

    let status = resp.status();

    if !status.is_success() {
        return Err(BrokerError::Publish(format!("proxy answered {}", status)));
    }

    let produced: ProduceResponse = resp
        .json()
        .await
        .map_err(|e| BrokerError::Publish(e.to_string()))?;

    match produced.offsets.iter().find(|o| o.error.is_some() || o.error_code.is_some()) {

        Some(offset) => Err(BrokerError::Publish(format!(
            "record rejected with code {:?}: {}",
            offset.error_code,
            offset.error.clone().unwrap_or_default()
        ))),

        None => Ok(()),

    }

}
