//! Remote command dispatch and poll/fetch throttling
//!
//! This crate is the orchestration core of the integration: the
//! [`VehicleSession`] owning per-vehicle state, the throttled vehicle
//! poll and cloud fetch, the command dispatcher with its notification and
//! event semantics, and the capability-driven service catalog.

mod catalog;
mod dispatcher;
mod session;
mod throttle;

#[cfg(test)]
pub(crate) mod testutil;

pub use catalog::{supported_services, supports_command, vehicle_services};
pub use dispatcher::{execute_command, CommandArg, CommandError};
pub use session::VehicleSession;
pub use throttle::{fetch_vehicle_data, poll_vehicle, ThrottleResult};
