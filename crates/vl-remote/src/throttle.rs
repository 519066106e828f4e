//! Throttled vehicle poll and cloud fetch
//!
//! Waking a vehicle drains its 12V battery and the cloud provider rate
//! limits it, so both operations refuse to run again until their interval
//! has elapsed. Passing a zero interval bypasses the throttle entirely;
//! the dispatcher uses that for its forced post-command fetch.

use std::time::Duration;
use tracing::debug;

use vl_api::{ApiError, VehicleApi};
use vl_core::{now_epoch, VehicleRecord};

/// Outcome of a throttled poll or fetch
///
/// Skipped and failed calls are distinct outcomes: the refresh cycle
/// logs failures and moves on, while the dispatcher propagates them.
#[derive(Debug)]
pub enum ThrottleResult {
    /// The interval had not elapsed; nothing was attempted
    Skipped,
    /// The call ran and the cloud confirmed it
    Succeeded,
    /// The call ran and failed
    Failed(ApiError),
}

impl ThrottleResult {
    /// True when an underlying API call was made, regardless of outcome
    pub fn attempted(&self) -> bool {
        !matches!(self, ThrottleResult::Skipped)
    }

    /// True when the call ran and succeeded
    pub fn succeeded(&self) -> bool {
        matches!(self, ThrottleResult::Succeeded)
    }

    /// Convert for the dispatcher context, where failures must propagate:
    /// `Succeeded` → `Ok(true)`, `Skipped` → `Ok(false)`, `Failed` → `Err`
    pub fn into_result(self) -> Result<bool, ApiError> {
        match self {
            ThrottleResult::Skipped => Ok(false),
            ThrottleResult::Succeeded => Ok(true),
            ThrottleResult::Failed(err) => Err(err),
        }
    }
}

/// Wake the vehicle and have it report fresh telemetry, at most once per
/// interval
///
/// The record's poll timestamp advances whenever a call was attempted,
/// success or failure, and never on a skip.
pub async fn poll_vehicle(
    api: &dyn VehicleApi,
    record: &mut VehicleRecord,
    interval: Duration,
) -> ThrottleResult {
    let now = now_epoch();
    let elapsed = now - record.last_remote_poll;

    if !interval.is_zero() && elapsed <= interval.as_secs_f64() {
        debug!(vin = %record.vin, elapsed, "Skipping vehicle poll, interval not elapsed");
        return ThrottleResult::Skipped;
    }

    debug!(vin = %record.vin, "Polling vehicle");
    let result = api.update(&record.vin, true).await;
    record.last_remote_poll = now;

    match result {
        Ok(true) => ThrottleResult::Succeeded,
        Ok(false) => ThrottleResult::Failed(ApiError::RemoteServiceFailure(
            "vehicle update was not confirmed".to_string(),
        )),
        Err(err) => ThrottleResult::Failed(err),
    }
}

/// Refresh the cloud's cached snapshot for this vehicle, at most once per
/// interval
///
/// Only refreshes the provider-side cache; reading the snapshot afterwards
/// is the caller's job (`VehicleApi::get_data`).
pub async fn fetch_vehicle_data(
    api: &dyn VehicleApi,
    record: &mut VehicleRecord,
    interval: Duration,
) -> ThrottleResult {
    let now = now_epoch();
    let elapsed = now - record.last_cloud_fetch;

    if !interval.is_zero() && elapsed <= interval.as_secs_f64() {
        debug!(vin = %record.vin, elapsed, "Skipping data fetch, interval not elapsed");
        return ThrottleResult::Skipped;
    }

    debug!(vin = %record.vin, "Fetching cloud data");
    let result = api.fetch(&record.vin, true).await;
    record.last_cloud_fetch = now;

    match result {
        Ok(true) => ThrottleResult::Succeeded,
        Ok(false) => ThrottleResult::Failed(ApiError::RemoteServiceFailure(
            "data fetch was not confirmed".to_string(),
        )),
        Err(err) => ThrottleResult::Failed(err),
    }
}
