use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use crate::event_publisher::EventPublisher;
use crate::state::ConnectionState;


/// Exponential backoff between reconnection attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {

    /// Wait before the first attempt after the broker is lost
    pub initial: Duration,

    /// The wait doubles after each failed attempt up to this limit
    pub max: Duration,

}

impl Backoff {

    /// The wait that follows `current` after another failure
    pub fn next(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max)
    }

}


impl EventPublisher {

    /// Keep trying to reconnect whenever the publisher is disconnected.
    /// Runs until the publisher is closed or the task is aborted.
    pub fn supervise(self: &Arc<Self>, backoff: Backoff) -> JoinHandle<()> {

        let publisher = self.clone();

        tokio::spawn(async move {

            let mut delay = backoff.initial;

            info!(target: "publisher", "Reconnecting to a lost broker is enabled (backoff {:?} to {:?}).", backoff.initial, backoff.max);

            loop {

                tokio::time::sleep(delay).await;

                if publisher.is_closed() {
                    break;
                }

                delay = match publisher.state() {

                    ConnectionState::Disconnected => {

                        if publisher.connect().await {
                            backoff.initial
                        } else {
                            backoff.next(delay)
                        }

                    },
                    _ => backoff.initial,

                };

            }

        })

    }

}
