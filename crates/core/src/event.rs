//! Domain event system — decoupled observation of the calculator pipeline.
//!
//! The controller and dispatcher publish events; views, logs and tests
//! subscribe without coupling to either.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::request::DispatchId;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// The activation gate was flipped
    GateToggled {
        active: bool,
        timestamp: DateTime<Utc>,
    },

    /// An input event mutated the buffer
    InputAccepted {
        expression: String,
        timestamp: DateTime<Utc>,
    },

    /// Equals was pressed but the buffer did not parse
    ParseRejected {
        expression: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A request was handed to the submitter
    DispatchStarted {
        id: DispatchId,
        function: String,
        timestamp: DateTime<Utc>,
    },

    /// A dispatch finished without error (submitted, skipped or cancelled)
    DispatchCompleted {
        id: DispatchId,
        status: String,
        timestamp: DateTime<Utc>,
    },

    /// The submitter raised an error
    DispatchFailed {
        id: DispatchId,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
