use log::{ info, warn, error };
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{
    select,
    signal,
    sync::oneshot,
    task::JoinHandle
};
use publisher::{ EventPublisher, KafkaRest };
use crate::errors::StartupError;
use crate::logger;
use crate::tables::{ Broker, Config };


/// The running parts of the service
#[derive(Debug)]
pub struct Service {

    /// The address the API is listening on
    pub addr: SocketAddr,

    /// The publisher orders are handed to
    pub publisher: Arc<EventPublisher>,

    /// Send to this to shut the API down gracefully
    api_tx: oneshot::Sender<()>,

    /// The task the API server runs in
    api_handle: JoinHandle<()>,

    /// The reconnect task, if reconnecting is enabled
    supervisor: Option<JoinHandle<()>>,

}


/// Starts the logger, reads the config file and starts the service.
pub async fn init(config_filepath: &str, use_logging: bool) -> Result<Service, StartupError> {

    // Setup and start the logger. This is configured based
    // on RUST_LOG env var.
    if use_logging {
        logger::start();
    }

    info!(target: "bootstrap", "Starting the order intake service ...");

    let config = get_config(config_filepath)?;

    start(config).await

}


/// Starts the publisher and then the API. The publisher connects to the
/// broker in the background so the API is up straight away.
pub async fn start(config: Config) -> Result<Service, StartupError> {

    let publisher = Arc::new(new_publisher(&config.broker)?);

    // fire and forget, orders go direct until this finishes
    publisher.start();

    let supervisor = match (&config.broker.reconnect, config.broker.enabled) {
        (Some(reconnect), true) => Some(publisher.supervise(reconnect.backoff())),
        _ => None,
    };

    let (addr, api_tx, api_handle) = match entrypoints::start(
        publisher.clone(),
        config.api.max_request_size,
        config.api.ip,
        config.api.port
    ).await {

        Ok(api) => api,
        Err(e) => {

            if let Some(supervisor) = &supervisor {
                supervisor.abort();
            }

            publisher.close().await;
            return Err(e.into());

        }

    };

    Ok(Service { addr, publisher, api_tx, api_handle, supervisor })

}


/// Build the publisher the broker settings ask for
fn new_publisher(settings: &Broker) -> Result<EventPublisher, StartupError> {

    if !settings.enabled {

        info!(target: "bootstrap", "The broker is disabled. Orders will be accepted without queuing.");
        return Ok(EventPublisher::disabled());

    }

    let mut broker = KafkaRest::new(&settings.url, &settings.topic)?;

    match (&settings.username, &settings.password) {
        (Some(username), Some(password)) => broker = broker.with_basic_auth(username, password),
        (Some(_), None) | (None, Some(_)) => warn!(target: "bootstrap", "Broker credentials need both a username and a password, ignoring them."),
        (None, None) => {}
    }

    info!(target: "bootstrap", "Publishing orders to topic {} through {}.", &settings.topic, &settings.url);

    Ok(EventPublisher::new(Arc::new(broker), settings.timeouts()))

}


/// Looks for the config file. If it can't be read, start with default
/// values. A file that can be read but not parsed is an error.
pub fn get_config(filepath: &str) -> Result<Config, StartupError> {

    match read_to_string(filepath) {

        Ok(content) => match toml::from_str(&content) {

            Ok(config) => {

                info!(target: "bootstrap", "Starting with configurations from {}.", filepath);
                Ok(config)

            },
            Err(source) => Err(StartupError::Config {
                path: filepath.to_string(),
                source
            })

        },
        Err(error) => {

            match error.kind() {
                ErrorKind::PermissionDenied => warn!(target: "bootstrap", "Permission denied reading {}.", filepath),
                ErrorKind::NotFound => warn!(target: "bootstrap", "Could not find the file {}.", filepath),
                _ => warn!(target: "bootstrap", "Unknown error while trying to read {}: {}", filepath, error),
            }

            info!(target: "bootstrap", "Reverting to the default configuration.");
            Ok(Config::default())

        }

    }

}


impl Service {

    /// Stop the API, then the publisher.
    pub async fn shutdown(self) {

        let _ = self.api_tx.send(());

        if let Err(e) = self.api_handle.await {
            error!(target: "bootstrap", "The API did not shut down cleanly: {}", e);
        }

        stop_publisher(&self.publisher, self.supervisor).await;

        info!(target: "bootstrap", "The order intake service has successfully shutdown.");

    }

}


async fn stop_publisher(publisher: &EventPublisher, supervisor: Option<JoinHandle<()>>) {

    if let Some(supervisor) = supervisor {
        supervisor.abort();
    }

    publisher.close().await;

}


/// Keeps the service running until the API fails or the user asks it
/// to stop, then shuts everything down.
pub async fn run(service: Service) {

    info!(target: "bootstrap", "Order intake service started on {}", service.addr);

    let Service { publisher, api_tx, mut api_handle, supervisor, .. } = service;

    select! {

        _ = &mut api_handle => {

            warn!(target: "bootstrap", "The API has failed. Starting shutdown process.");

        }

        // listen for a ctrl-c keystroke i.e. the user wants
        // the service to shutdown
        _ = signal::ctrl_c() => {

            warn!(target: "bootstrap", "Shutdown request received. Starting shutdown process.");

            // initiate the api shutdown and let in-flight requests finish
            let _ = api_tx.send(());

            if let Err(e) = api_handle.await {
                error!(target: "bootstrap", "The API did not shut down cleanly: {}", e);
            }

        }

    };

    stop_publisher(&publisher, supervisor).await;

    info!(target: "bootstrap", "The order intake service has successfully shutdown.");

}
