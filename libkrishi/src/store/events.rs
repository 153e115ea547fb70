//! Change notifications for the application store
//!
//! Every store setter emits exactly one [`StoreEvent`] on the session's
//! [`EventBus`]. Events carry a sequence number and a full snapshot taken
//! right after the write, so a subscriber never has to read the store
//! again to render.
//!
//! # Example
//!
//! ```
//! use libkrishi::store::events::{EventBus, StoreEvent, StoreField};
//! use libkrishi::store::StoreSnapshot;
//!
//! let event_bus = EventBus::new(16);
//! let mut receiver = event_bus.subscribe();
//!
//! event_bus.emit(StoreEvent {
//!     seq: 1,
//!     field: StoreField::Online,
//!     snapshot: StoreSnapshot::default(),
//! });
//!
//! let event = receiver.try_recv().unwrap();
//! assert_eq!(event.field, StoreField::Online);
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::StoreSnapshot;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<StoreEvent>;

/// Event bus for distributing store notifications
///
/// Backed by a broadcast channel: any number of subscribers, and emitting
/// never blocks. Events are dropped if nobody is subscribed.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a new event bus buffering up to `capacity` events per subscriber
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events emitted from now on
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: StoreEvent) {
        // send() only fails when there are no receivers
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Which store field a setter wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreField {
    Language,
    Profile,
    SoilData,
    Recommendations,
    Schemes,
    Online,
    Step,
}

/// Notification emitted once per setter call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    /// Position of the write in the session's total order, starting at 1
    pub seq: u64,
    /// Field that was written
    pub field: StoreField,
    /// Store contents immediately after the write
    pub snapshot: StoreSnapshot,
}
