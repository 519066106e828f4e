//! Event types for the integration event bus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trait for typed event data
///
/// Implement this trait for any data type that should be carried by events.
pub trait EventData: Clone + Send + Sync + 'static {
    /// The event type string for this data type
    fn event_type() -> &'static str;
}

/// Event type identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventType(String);

impl EventType {
    /// Create a new event type
    pub fn new(event_type: impl Into<String>) -> Self {
        Self(event_type.into())
    }

    /// Get the event type as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Special event type that matches all events
    pub fn match_all() -> Self {
        Self("*".to_string())
    }

    /// Check if this is the MATCH_ALL event type
    pub fn is_match_all(&self) -> bool {
        self.0 == "*"
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event fired on the integration event bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event<T = serde_json::Value> {
    /// The type of event
    pub event_type: EventType,

    /// The event data
    pub data: T,

    /// When the event was fired
    pub time_fired: DateTime<Utc>,
}

impl<T> Event<T> {
    /// Create a new event with current timestamp
    pub fn new(event_type: impl Into<EventType>, data: T) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            time_fired: Utc::now(),
        }
    }
}

impl<T: EventData> Event<T> {
    /// Create a typed event from EventData
    pub fn typed(data: T) -> Self {
        Self::new(T::event_type(), data)
    }
}

/// Command lifecycle event types fired by the dispatcher
pub mod events {
    use super::*;
    use crate::RemoteCommand;

    /// A remote command was dispatched
    pub const COMMAND_SENT: &str = "vehiclelink_command_sent";

    /// A remote command completed successfully
    pub const COMMAND_SUCCEEDED: &str = "vehiclelink_command_succeeded";

    /// A remote command failed
    pub const COMMAND_FAILED: &str = "vehiclelink_command_failed";

    /// Data for COMMAND_SENT events
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CommandSentData {
        pub command: RemoteCommand,
        pub car_name: String,
    }

    impl EventData for CommandSentData {
        fn event_type() -> &'static str {
            COMMAND_SENT
        }
    }

    /// Data for COMMAND_SUCCEEDED events
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CommandSucceededData {
        pub command: RemoteCommand,
        pub car_name: String,
    }

    impl EventData for CommandSucceededData {
        fn event_type() -> &'static str {
            COMMAND_SUCCEEDED
        }
    }

    /// Data for COMMAND_FAILED events
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CommandFailedData {
        pub command: RemoteCommand,
        pub car_name: String,
        pub message: String,
    }

    impl EventData for CommandFailedData {
        fn event_type() -> &'static str {
            COMMAND_FAILED
        }
    }
}
