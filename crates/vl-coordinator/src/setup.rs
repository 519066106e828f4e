//! Session setup: connect, enumerate vehicles, build records

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use vl_api::{ApiError, VehicleApi};
use vl_core::{ApiGeneration, SessionOptions, VehicleCapabilities, VehicleRecord, Vin};
use vl_remote::VehicleSession;

/// Errors from session setup
///
/// `InvalidAuth` is permanent; the host should not retry until the user
/// fixes their credentials. `NotReady` is transient and retried by the
/// host's setup machinery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("invalid account credentials: {0}")]
    InvalidAuth(String),

    #[error("cloud service not ready: {0}")]
    NotReady(String),
}

impl From<ApiError> for SetupError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidCredentials(msg) => SetupError::InvalidAuth(msg),
            other => SetupError::NotReady(other.message().to_string()),
        }
    }
}

/// Connect to the cloud and build a session with one record per vehicle
/// on the account
///
/// Every vehicle gets a record, including those without a safety
/// subscription. Capability accessors and the service catalog see them
/// all; the refresh cycle filters.
pub async fn connect_session(
    api: Arc<dyn VehicleApi>,
    options: SessionOptions,
) -> Result<Arc<VehicleSession>, SetupError> {
    api.connect().await?;

    let session = VehicleSession::new(api.clone(), options);
    for vin in api.get_vehicles() {
        let record = vehicle_record(api.as_ref(), &vin).await?;
        debug!(vin = %vin, name = %record.display_name, "Registered vehicle");
        session.insert_vehicle(record);
    }

    info!(vehicles = session.vehicle_count(), "Vehicle session connected");
    Ok(Arc::new(session))
}

/// Query a vehicle's identifiers and capabilities
async fn vehicle_record(api: &dyn VehicleApi, vin: &Vin) -> Result<VehicleRecord, ApiError> {
    let capabilities = VehicleCapabilities {
        has_ev: api.get_ev_status(vin)?,
        has_remote_start: api.get_res_status(vin)?,
        has_remote_service: api.get_remote_status(vin)?,
        has_safety_subscription: api.get_safety_status(vin)?,
        has_lock_status: api.has_lock_status(vin).await?,
        has_power_windows: api.has_power_windows(vin).await?,
        has_sunroof: api.has_sunroof(vin)?,
        has_tpms: api.has_tpms(vin)?,
    };

    Ok(VehicleRecord::new(
        vin.clone(),
        api.vin_to_name(vin)?,
        ApiGeneration::from_api_tag(&api.get_api_gen(vin)?),
        capabilities,
    )
    .with_model_name(api.get_model_name(vin)?)
    .with_model_year(api.get_model_year(vin)?))
}
