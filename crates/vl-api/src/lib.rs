//! Vehicle cloud API boundary for the vehiclelink integration
//!
//! This crate defines the `VehicleApi` trait, the seam between the
//! orchestration core and whatever client library actually talks to the
//! manufacturer's cloud. The core only ever holds an `Arc<dyn VehicleApi>`;
//! tests substitute scripted fakes.

mod data;
mod error;

pub use data::{VehicleData, EV_CHARGER_CHARGING, STATUS_EV_CHARGER_STATE};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;
use vl_core::{UnlockDoor, Vin};

/// The vehicle cloud API collaborator
///
/// Remote-command methods return `Ok(true)` on confirmed success,
/// `Ok(false)` when the cloud reports the command did not take effect, and
/// `Err` on a domain failure. Capability getters are only called during
/// session setup; their answers are fixed for a vehicle's lifetime.
///
/// `update` wakes the physical vehicle over the cellular channel and is
/// expensive and rate-limited; `fetch` only refreshes the provider's own
/// cached snapshot and is cheap.
#[async_trait]
pub trait VehicleApi: Send + Sync {
    /// Authenticate and establish the cloud session
    async fn connect(&self) -> ApiResult<()>;

    /// All VINs on the account
    fn get_vehicles(&self) -> Vec<Vin>;

    // Capability getters, queried once at session setup.

    fn get_ev_status(&self, vin: &Vin) -> ApiResult<bool>;
    fn get_res_status(&self, vin: &Vin) -> ApiResult<bool>;
    fn get_remote_status(&self, vin: &Vin) -> ApiResult<bool>;
    fn get_safety_status(&self, vin: &Vin) -> ApiResult<bool>;
    async fn has_lock_status(&self, vin: &Vin) -> ApiResult<bool>;
    async fn has_power_windows(&self, vin: &Vin) -> ApiResult<bool>;
    fn has_sunroof(&self, vin: &Vin) -> ApiResult<bool>;
    fn has_tpms(&self, vin: &Vin) -> ApiResult<bool>;
    fn get_model_name(&self, vin: &Vin) -> ApiResult<String>;
    fn get_model_year(&self, vin: &Vin) -> ApiResult<String>;
    fn vin_to_name(&self, vin: &Vin) -> ApiResult<String>;
    fn get_api_gen(&self, vin: &Vin) -> ApiResult<String>;

    /// Wake the vehicle and have it report fresh telemetry to the cloud
    async fn update(&self, vin: &Vin, force: bool) -> ApiResult<bool>;

    /// Refresh the cloud's cached snapshot for this VIN
    async fn fetch(&self, vin: &Vin, force: bool) -> ApiResult<bool>;

    /// Read the cloud's cached snapshot for this VIN
    async fn get_data(&self, vin: &Vin) -> ApiResult<VehicleData>;

    // Remote commands.

    async fn lock(&self, vin: &Vin) -> ApiResult<bool>;
    async fn unlock(&self, vin: &Vin, door: UnlockDoor) -> ApiResult<bool>;
    async fn horn(&self, vin: &Vin) -> ApiResult<bool>;
    async fn horn_stop(&self, vin: &Vin) -> ApiResult<bool>;
    async fn lights(&self, vin: &Vin) -> ApiResult<bool>;
    async fn lights_stop(&self, vin: &Vin) -> ApiResult<bool>;
    async fn remote_start(&self, vin: &Vin, preset_name: &str) -> ApiResult<bool>;
    async fn remote_stop(&self, vin: &Vin) -> ApiResult<bool>;
    async fn charge_start(&self, vin: &Vin) -> ApiResult<bool>;
}
