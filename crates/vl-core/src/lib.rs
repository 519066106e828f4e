//! Core types for the vehiclelink integration
//!
//! This crate provides the fundamental types shared by the vehiclelink
//! crates: Vin, VehicleRecord, RemoteCommand, the user-configurable
//! options, and the command lifecycle event types.

mod command;
mod event;
mod options;
mod record;
mod vin;

pub use command::{RemoteCommand, UnknownCommand, UnlockDoor};
pub use event::{events, Event, EventData, EventType};
pub use options::{
    NotificationOption, OptionParseError, PollingOption, SessionOptions,
};
pub use record::{ApiGeneration, VehicleCapabilities, VehicleRecord};
pub use vin::{Vin, VinError};

/// Integration domain name; also the pending-notification key and the
/// event type prefix
pub const DOMAIN: &str = "vehiclelink";

/// Seconds between cloud snapshot fetches; also the refresh cycle cadence
pub const FETCH_INTERVAL: u64 = 300;

/// Seconds between vehicle polls when polling is always enabled
pub const POLL_INTERVAL: u64 = 7200;

/// Seconds between vehicle polls while the vehicle reports charging
pub const POLL_INTERVAL_CHARGING: u64 = 1800;

/// Current wall-clock time as epoch seconds
///
/// Throttle timestamps are plain epoch floats so a zeroed record always
/// reads as "long overdue" and forces the first poll/fetch.
pub fn now_epoch() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
