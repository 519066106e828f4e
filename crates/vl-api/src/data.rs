//! Cloud snapshot data for one vehicle

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known status key: EV charger state
pub const STATUS_EV_CHARGER_STATE: &str = "EV_CHARGER_STATE_TYPE";

/// Charger state value reported while a charging session is active
pub const EV_CHARGER_CHARGING: &str = "CHARGING";

/// The cloud-cached snapshot for one VIN
///
/// `status` is the raw key/value map the cloud reports; the entity layer
/// picks the fields it renders. Only the charging flag is interpreted
/// here, because the refresh cycle's charging-only polling mode needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleData {
    /// Raw vehicle status fields
    #[serde(default)]
    pub status: HashMap<String, serde_json::Value>,

    /// Climate preset names available for remote start
    #[serde(default)]
    pub climate_presets: Vec<String>,
}

impl VehicleData {
    /// True when the snapshot has no status content; empty snapshots are
    /// never published to the shared cache
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// True when the snapshot reports an active EV charging session
    pub fn is_ev_charging(&self) -> bool {
        self.status
            .get(STATUS_EV_CHARGER_STATE)
            .and_then(|v| v.as_str())
            .map(|s| s == EV_CHARGER_CHARGING)
            .unwrap_or(false)
    }
}
