//! Per-vehicle record: identity, capability flags, throttle timestamps

use serde::{Deserialize, Serialize};

use crate::Vin;

/// Cloud API generation of a vehicle
///
/// Fixed at record creation; determines which capability-gated behaviors
/// apply downstream. Unrecognized values from the cloud parse to `Unknown`
/// rather than failing setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiGeneration {
    Gen1,
    Gen2,
    Gen3,
    Gen4,
    #[default]
    Unknown,
}

impl ApiGeneration {
    /// Parse the cloud provider's generation tag ("g1".."g4")
    pub fn from_api_tag(tag: &str) -> Self {
        match tag {
            "g1" => ApiGeneration::Gen1,
            "g2" => ApiGeneration::Gen2,
            "g3" => ApiGeneration::Gen3,
            "g4" => ApiGeneration::Gen4,
            _ => ApiGeneration::Unknown,
        }
    }
}

/// Capability flags for one vehicle, fixed at record creation
///
/// These are queried from the cloud once at session setup and drive which
/// remote services and entities are valid for the vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCapabilities {
    /// Vehicle is an EV (plug-in hybrid or battery electric)
    pub has_ev: bool,
    /// Vehicle supports remote engine start
    pub has_remote_start: bool,
    /// Vehicle has an active remote-services subscription
    pub has_remote_service: bool,
    /// Vehicle has an active safety-plus subscription (required for any
    /// data retrieval)
    pub has_safety_subscription: bool,
    /// Cloud reports door lock status for this vehicle
    pub has_lock_status: bool,
    /// Cloud reports power window status
    pub has_power_windows: bool,
    /// Cloud reports moonroof/sunroof status
    pub has_sunroof: bool,
    /// Cloud reports tire pressures
    pub has_tpms: bool,
}

/// Per-VIN vehicle record
///
/// Created once at session setup from cloud-queried capabilities. The only
/// mutable fields are the two throttle timestamps (written by the poll and
/// fetch throttles) and the selected climate preset (written by the command
/// dispatcher). Everything else is immutable for the record's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Unique vehicle identifier
    pub vin: Vin,

    /// Human-readable label from the owner's account
    pub display_name: String,

    /// Manufacturer model name
    pub model_name: String,

    /// Model year as reported by the cloud
    pub model_year: String,

    /// Cloud API generation
    pub api_generation: ApiGeneration,

    /// Capability flags
    pub capabilities: VehicleCapabilities,

    /// Epoch seconds of the last attempted vehicle poll; 0 forces the
    /// first poll
    #[serde(default)]
    pub last_remote_poll: f64,

    /// Epoch seconds of the last attempted cloud fetch; 0 forces the
    /// first fetch
    #[serde(default)]
    pub last_cloud_fetch: f64,

    /// Climate preset the user last selected, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_climate_preset: Option<String>,
}

impl VehicleRecord {
    /// Create a new record with zeroed throttle timestamps
    pub fn new(
        vin: Vin,
        display_name: impl Into<String>,
        api_generation: ApiGeneration,
        capabilities: VehicleCapabilities,
    ) -> Self {
        Self {
            vin,
            display_name: display_name.into(),
            model_name: String::new(),
            model_year: String::new(),
            api_generation,
            capabilities,
            last_remote_poll: 0.0,
            last_cloud_fetch: 0.0,
            selected_climate_preset: None,
        }
    }

    /// Set the model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Set the model year
    pub fn with_model_year(mut self, model_year: impl Into<String>) -> Self {
        self.model_year = model_year.into();
        self
    }
}
