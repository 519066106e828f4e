//! Remote command identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unrecognized command name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown remote command: {0}")]
pub struct UnknownCommand(pub String);

/// A named remote command
///
/// The closed set of operations that can be sent to a vehicle or its cloud
/// proxy. Dispatch maps each variant to a typed `VehicleApi` method; the
/// wire names below are what the host platform uses when registering and
/// calling services.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RemoteCommand {
    /// Refresh the cloud-side snapshot (no vehicle contact)
    Fetch,
    /// Wake the vehicle and have it report fresh telemetry
    PollVehicle,
    /// Lock all doors
    Lock,
    /// Unlock doors (optionally a specific door group)
    Unlock,
    /// Sound the horn
    Horn,
    /// Stop sounding the horn
    HornStop,
    /// Flash the lights
    Lights,
    /// Stop flashing the lights
    LightsStop,
    /// Start the engine/climate with a preset
    RemoteStart,
    /// Stop a remote start
    RemoteStop,
    /// Begin EV charging
    ChargeStart,
}

impl RemoteCommand {
    /// All commands, in wire-name order
    pub const ALL: [RemoteCommand; 11] = [
        RemoteCommand::Fetch,
        RemoteCommand::PollVehicle,
        RemoteCommand::Lock,
        RemoteCommand::Unlock,
        RemoteCommand::Horn,
        RemoteCommand::HornStop,
        RemoteCommand::Lights,
        RemoteCommand::LightsStop,
        RemoteCommand::RemoteStart,
        RemoteCommand::RemoteStop,
        RemoteCommand::ChargeStart,
    ];

    /// The wire name used for service registration and event payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteCommand::Fetch => "fetch",
            RemoteCommand::PollVehicle => "poll_vehicle",
            RemoteCommand::Lock => "lock",
            RemoteCommand::Unlock => "unlock",
            RemoteCommand::Horn => "horn",
            RemoteCommand::HornStop => "horn_stop",
            RemoteCommand::Lights => "lights",
            RemoteCommand::LightsStop => "lights_stop",
            RemoteCommand::RemoteStart => "remote_start",
            RemoteCommand::RemoteStop => "remote_stop",
            RemoteCommand::ChargeStart => "charge_start",
        }
    }
}

impl FromStr for RemoteCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RemoteCommand::ALL
            .iter()
            .find(|cmd| cmd.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Door group selector for the unlock command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockDoor {
    /// Unlock every door
    #[default]
    AllDoors,
    /// Unlock the driver's door only
    DriversDoor,
    /// Unlock the tailgate only
    Tailgate,
}
