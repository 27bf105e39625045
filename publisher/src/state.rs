use serde_derive::{ Deserialize, Serialize };
use std::fmt;
use std::sync::atomic::{ AtomicU8, Ordering };


/// Whether the publisher believes the broker can be reached. Orders are
/// only sent to the broker while `Connected`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ConnectionState {

    /// No connection. The state at start up and after any broker failure.
    Disconnected = 0,

    /// A connection attempt is in flight.
    Connecting = 1,

    /// The last connection attempt succeeded and no publish has failed since.
    Connected = 2,

}

impl ConnectionState {

    fn from_u8(value: u8) -> ConnectionState {

        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }

    }

}

impl fmt::Display for ConnectionState {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {

        let name = match self {
            ConnectionState::Disconnected => "DISCONNECTED",
            ConnectionState::Connecting => "CONNECTING",
            ConnectionState::Connected => "CONNECTED",
        };

        write!(f, "{}", name)

    }

}


/// Holds a `ConnectionState` that many tasks can read and change at once.
/// Every change is a single atomic operation so readers never see a
/// half-made transition.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {

    pub(crate) fn new() -> StateCell {
        StateCell(AtomicU8::new(ConnectionState::Disconnected as u8))
    }

    pub(crate) fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move from `from` to `to`. Returns false, changing nothing, if the
    /// state was no longer `from`.
    pub(crate) fn transition(&self, from: ConnectionState, to: ConnectionState) -> bool {

        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()

    }

    pub(crate) fn set(&self, to: ConnectionState) {
        self.0.store(to as u8, Ordering::Release);
    }

}
