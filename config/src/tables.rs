use serde::de::Error;
use serde::*;
use serde_derive::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;
use publisher::{ Backoff, Timeouts };

/// Top level container of all the fields in the config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {

   /// settings for the API
   #[serde(default)]
   pub api: Api,

   /// settings for the message broker orders are published to
   #[serde(default)]
   pub broker: Broker,

}


/// Settings for the API
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Api {

   /// the ip that the API will listen for requests on
   #[serde(default="default_ip")]
   pub ip: Ipv4Addr,

   /// the port number that the API will listen for requests on
   #[serde(default="default_port")]
   pub port: u16,

   /// the maximum size of an api request measured in bytes
   #[serde(default="default_request_size")]
   pub max_request_size: u64,

}

/// enable default values when declaring the API config
impl Default for Api {

    fn default() -> Api {

      Api {
         ip: default_ip(),
         port: default_port(),
         max_request_size: default_request_size()
      }

    }

}


/// default the ip field to "127.0.0.1"
fn default_ip() -> Ipv4Addr {
	Ipv4Addr::new(127, 0, 0, 1)
}


/// default the port field to 3030
fn default_port() -> u16 {
	3030
}


/// default the max_request_size field to 16KB
fn default_request_size() -> u64 {
   1024 * 16
}


/// Settings for the message broker. Orders are accepted whether or not
/// the broker can be reached, these only decide how hard to try.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Broker {

   /// switch publishing off entirely. Every order is then delivered directly.
   #[serde(default="default_enabled")]
   pub enabled: bool,

   /// the root url of the Kafka REST Proxy
   #[serde(default="default_url")]
   pub url: String,

   /// the topic order events are written to
   #[serde(default="default_topic")]
   pub topic: String,

   /// how long a connection attempt may take in milliseconds
   #[serde(default="default_connect_timeout", deserialize_with="non_zero")]
   pub connect_timeout_ms: u64,

   /// how long publishing one order may take in milliseconds
   #[serde(default="default_publish_timeout", deserialize_with="non_zero")]
   pub publish_timeout_ms: u64,

   /// optional username for the proxy
   #[serde(default)]
   pub username: Option<String>,

   /// optional password for the proxy
   #[serde(default)]
   pub password: Option<String>,

   /// reconnect to a lost broker in the background. Off unless this
   /// table is present.
   #[serde(default)]
   pub reconnect: Option<Reconnect>,

}

impl Broker {

    /// The connect and publish timeouts as durations
    pub fn timeouts(&self) -> Timeouts {

        Timeouts {
            connect: Duration::from_millis(self.connect_timeout_ms),
            publish: Duration::from_millis(self.publish_timeout_ms),
        }

    }

}

/// enable default values when declaring the Broker config
impl Default for Broker {

    fn default() -> Broker {

        Broker {
            enabled: default_enabled(),
            url: default_url(),
            topic: default_topic(),
            connect_timeout_ms: default_connect_timeout(),
            publish_timeout_ms: default_publish_timeout(),
            username: None,
            password: None,
            reconnect: None,
        }

    }

}


fn default_enabled() -> bool {
   true
}

/// default the url to a proxy running on the same machine
fn default_url() -> String {
   String::from("http://127.0.0.1:8082")
}

fn default_topic() -> String {
   String::from("orders")
}

fn default_connect_timeout() -> u64 {
   2000
}

fn default_publish_timeout() -> u64 {
   1000
}


/// Settings for reconnecting to the broker after it has been lost
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Reconnect {

   /// wait before the first attempt in milliseconds
   #[serde(default="default_initial_backoff", deserialize_with="non_zero")]
   pub initial_backoff_ms: u64,

   /// the wait doubles after every failed attempt up to this many milliseconds
   #[serde(default="default_max_backoff", deserialize_with="non_zero")]
   pub max_backoff_ms: u64,

}

impl Reconnect {

    /// The backoff as durations. The limit is never less than the first wait.
    pub fn backoff(&self) -> Backoff {

        Backoff {
            initial: Duration::from_millis(self.initial_backoff_ms),
            max: Duration::from_millis(self.max_backoff_ms.max(self.initial_backoff_ms)),
        }

    }

}

fn default_initial_backoff() -> u64 {
   500
}

fn default_max_backoff() -> u64 {
   30000
}


/// A zero wait would make every broker call time out straight away
fn non_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {

    let millis = u64::deserialize(d)?;

    if millis == 0 {
        return Err(D::Error::custom("a timeout or backoff must be greater than 0 milliseconds"));
    }

    Ok(millis)

}
