use async_trait::async_trait;
use domains::{ DeliveryMode, Order, OrderEvent };
use log::{ debug, info, warn };
use serde_derive::{ Deserialize, Serialize };
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{ AtomicBool, AtomicU64, Ordering };
use std::time::Duration;
use tokio::task::JoinHandle;
use crate::broker::Broker;
use crate::errors::BrokerError;
use crate::state::{ ConnectionState, StateCell };


/// Anything an order can be handed to after it has been accepted.
#[async_trait]
pub trait Publish: Send + Sync {

    /// Try to hand the order on. Must not fail and must return in bounded
    /// time whatever happens downstream.
    async fn attempt_publish(&self, order: &Order) -> DeliveryMode;

}


/// How long to wait on the broker before giving up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {

    /// Limit on a connection attempt (and on closing the client)
    pub connect: Duration,

    /// Limit on publishing a single order
    pub publish: Duration,

}

impl Default for Timeouts {

    fn default() -> Timeouts {

        Timeouts {
            connect: Duration::from_millis(2000),
            publish: Duration::from_millis(1000),
        }

    }

}


/// How many publish attempts ended in each delivery mode
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryCounts {
    /// Accepted by the broker
    pub queued: u64,
    /// Broker skipped because it was unreachable
    pub direct: u64,
    /// Broker tried and failed
    pub degraded: u64,
}

#[derive(Debug, Default)]
struct DeliveryStats {
    queued: AtomicU64,
    direct: AtomicU64,
    degraded: AtomicU64,
}

impl DeliveryStats {

    fn record(&self, mode: DeliveryMode) -> DeliveryMode {

        let counter = match mode {
            DeliveryMode::Queued => &self.queued,
            DeliveryMode::Direct => &self.direct,
            DeliveryMode::Degraded => &self.degraded,
        };

        counter.fetch_add(1, Ordering::Relaxed);
        mode

    }

    fn snapshot(&self) -> DeliveryCounts {

        DeliveryCounts {
            queued: self.queued.load(Ordering::Relaxed),
            direct: self.direct.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
        }

    }

}


/// Owns the broker client and the connection state. Only this type ever
/// changes the state, everything else can just read it.
#[derive(Debug)]
pub struct EventPublisher {

    /// `None` when publishing to a broker has been switched off
    broker: Option<Arc<dyn Broker>>,

    state: StateCell,

    timeouts: Timeouts,

    stats: DeliveryStats,

    /// Set once the publisher has been closed so it never reconnects
    closed: AtomicBool,

}

impl EventPublisher {

    /// Create a publisher for a broker. It starts disconnected, call
    /// `start` to begin connecting.
    pub fn new(broker: Arc<dyn Broker>, timeouts: Timeouts) -> EventPublisher {

        EventPublisher {
            broker: Some(broker),
            state: StateCell::new(),
            timeouts,
            stats: DeliveryStats::default(),
            closed: AtomicBool::new(false),
        }

    }

    /// Create a publisher with no broker. Every order is delivered directly.
    pub fn disabled() -> EventPublisher {

        EventPublisher {
            broker: None,
            state: StateCell::new(),
            timeouts: Timeouts::default(),
            stats: DeliveryStats::default(),
            closed: AtomicBool::new(false),
        }

    }

    /// Make one connection attempt in the background. Returns straight away,
    /// nothing needs to wait on the returned handle.
    pub fn start(self: &Arc<Self>) -> JoinHandle<bool> {

        let publisher = self.clone();

        tokio::spawn(async move {
            publisher.connect().await
        })

    }

    /// Make a single connection attempt bounded by the connect timeout.
    /// Returns true if the publisher is connected afterwards.
    pub async fn connect(&self) -> bool {

        let broker = match &self.broker {
            Some(broker) => broker,
            None => {
                debug!(target: "publisher", "No broker configured, orders will be delivered directly.");
                return false;
            }
        };

        if self.closed.load(Ordering::Acquire) {
            return false;
        }

        // only one attempt may be in flight
        if !self.state.transition(ConnectionState::Disconnected, ConnectionState::Connecting) {
            return self.state() == ConnectionState::Connected;
        }

        // close may have finished between the first check and the swap
        if self.closed.load(Ordering::Acquire) {
            self.state.transition(ConnectionState::Connecting, ConnectionState::Disconnected);
            return false;
        }

        info!(target: "publisher", "Connecting to the message broker ...");

        match bounded(self.timeouts.connect, broker.connect()).await {

            Ok(()) => {

                let connected = self.state.transition(ConnectionState::Connecting, ConnectionState::Connected);

                if connected {
                    info!(target: "publisher", "Connected to the message broker.");
                }

                connected

            },
            Err(error) => {

                self.state.transition(ConnectionState::Connecting, ConnectionState::Disconnected);
                warn!(target: "publisher", "{}", error);
                warn!(target: "publisher", "Orders will be accepted without queuing until the broker is reconnected.");
                false

            }

        }

    }

    /// The current connection state
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// How many orders have gone out in each delivery mode so far
    pub fn stats(&self) -> DeliveryCounts {
        self.stats.snapshot()
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Close the broker client and stop using it for good.
    pub async fn close(&self) {

        self.closed.store(true, Ordering::Release);

        if let Some(broker) = &self.broker {

            if let Err(error) = bounded(self.timeouts.connect, broker.close()).await {
                warn!(target: "publisher", "Failed to close the broker client cleanly: {}", error);
            }

        }

        self.state.set(ConnectionState::Disconnected);
        info!(target: "publisher", "Publisher closed.");

    }

    async fn send(&self, broker: &Arc<dyn Broker>, order: &Order) -> Result<(), BrokerError> {

        let event = OrderEvent::placed(order);
        let payload = serde_json::to_value(&event)?;

        bounded(self.timeouts.publish, broker.send(&event.key(), &payload)).await

    }

}

#[async_trait]
impl Publish for EventPublisher {

    async fn attempt_publish(&self, order: &Order) -> DeliveryMode {

        let broker = match &self.broker {
            Some(broker) if self.state() == ConnectionState::Connected => broker,
            _ => return self.stats.record(DeliveryMode::Direct),
        };

        match self.send(broker, order).await {

            Ok(()) => {
                debug!(target: "publisher", "Order {} queued.", order.id());
                self.stats.record(DeliveryMode::Queued)
            },
            Err(error) => {

                // presume the connection is stale. Only the first of several
                // concurrent failures logs the transition.
                if self.state.transition(ConnectionState::Connected, ConnectionState::Disconnected) {
                    warn!(target: "publisher", "Lost the message broker: {}", error);
                }

                warn!(target: "publisher", "Order {} accepted without queuing.", order.id());
                self.stats.record(DeliveryMode::Degraded)

            }

        }

    }

}


/// Run a broker call, treating a timeout the same as a failure
async fn bounded<F>(limit: Duration, call: F) -> Result<(), BrokerError>
where
    F: Future<Output = Result<(), BrokerError>>
{

    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(BrokerError::Timeout(limit)),
    }

}
