//! User-configurable integration options
//!
//! The host platform persists these as strings; parsing is explicit and an
//! unrecognized stored value is a configuration error to surface, never a
//! silent fallback to some default variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a persisted option value is not recognized
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized value for option '{option}': {value}")]
pub struct OptionParseError {
    /// Which option failed to parse
    pub option: &'static str,
    /// The offending stored value
    pub value: String,
}

/// How much notification traffic remote commands generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationOption {
    /// No notifications at all
    Disable,
    /// Notify only when a command fails
    #[default]
    Failure,
    /// Transient notification while a command is in flight, plus failures
    Pending,
    /// Persistent notification on completion, plus pending and failures
    Success,
}

impl NotificationOption {
    /// The persisted wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationOption::Disable => "disable",
            NotificationOption::Failure => "failure",
            NotificationOption::Pending => "pending",
            NotificationOption::Success => "success",
        }
    }
}

impl FromStr for NotificationOption {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(NotificationOption::Disable),
            "failure" => Ok(NotificationOption::Failure),
            "pending" => Ok(NotificationOption::Pending),
            "success" => Ok(NotificationOption::Success),
            _ => Err(OptionParseError {
                option: "notification",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for NotificationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether and when the refresh cycle wakes the physical vehicle
///
/// Polling drains the vehicle's 12V battery and is rate-limited by the
/// cloud provider, so it is off by default; the vehicle still pushes an
/// update when the engine is turned off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollingOption {
    /// Never poll
    #[default]
    Disable,
    /// Poll on a short interval, but only while the vehicle reports an
    /// active charging session
    Charging,
    /// Poll on the long interval every cycle
    Enable,
}

impl PollingOption {
    /// The persisted wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            PollingOption::Disable => "disable",
            PollingOption::Charging => "charging",
            PollingOption::Enable => "enable",
        }
    }
}

impl FromStr for PollingOption {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(PollingOption::Disable),
            "charging" => Ok(PollingOption::Charging),
            "enable" => Ok(PollingOption::Enable),
            _ => Err(OptionParseError {
                option: "polling",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PollingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The session's current option values
///
/// Stored behind a lock on the session and read per-invocation; components
/// never cache a copy across calls, so option changes from the host take
/// effect on the next command or cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub notification: NotificationOption,
    pub polling: PollingOption,
}

impl SessionOptions {
    /// Parse both options from their persisted string values
    pub fn parse(notification: &str, polling: &str) -> Result<Self, OptionParseError> {
        Ok(Self {
            notification: notification.parse()?,
            polling: polling.parse()?,
        })
    }
}
