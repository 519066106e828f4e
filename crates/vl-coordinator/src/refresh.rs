//! The per-cycle refresh pass over all vehicles

use dashmap::DashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use vl_api::{ApiError, VehicleApi, VehicleData};
use vl_core::{
    PollingOption, VehicleRecord, Vin, FETCH_INTERVAL, POLL_INTERVAL, POLL_INTERVAL_CHARGING,
};
use vl_remote::{fetch_vehicle_data, poll_vehicle, ThrottleResult, VehicleSession};

/// Error surfaced to the scheduler when an entire refresh cycle fails
///
/// Raised only when every eligible vehicle failed this cycle; the host
/// platform reacts by marking entities unavailable. A single vehicle
/// failing while others succeed is logged and absorbed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("vehicle data update failed: {0}")]
pub struct UpdateFailed(pub String);

/// Run one refresh pass: for each vehicle with a safety subscription,
/// apply the polling policy, the fetch throttle, then read and publish
/// the latest snapshot into `cache`
pub(crate) async fn refresh_all_vehicles(
    session: &VehicleSession,
    cache: &DashMap<Vin, VehicleData>,
) -> Result<(), UpdateFailed> {
    // Read per-invocation so option changes apply to the next cycle
    let polling = session.options().await.polling;
    let api = session.api().clone();

    let mut eligible = 0usize;
    let mut failures: Vec<String> = Vec::new();

    for (vin, handle) in session.vehicle_handles() {
        let mut record = handle.lock().await;
        if !record.capabilities.has_safety_subscription {
            debug!(vin = %vin, "Skipping vehicle without safety subscription");
            continue;
        }
        eligible += 1;

        match refresh_one(api.as_ref(), &mut record, polling, cache).await {
            Ok(Some(data)) => {
                cache.insert(vin, data);
            }
            Ok(None) => {
                debug!(vin = %vin, "No data received for vehicle");
            }
            Err(err) => {
                warn!(vin = %vin, error = %err, "Vehicle refresh failed");
                failures.push(format!("{vin}: {err}"));
            }
        }
    }

    if eligible > 0 && failures.len() == eligible {
        return Err(UpdateFailed(failures.join("; ")));
    }
    Ok(())
}

/// Refresh one vehicle; `Ok(Some)` carries a non-empty snapshot to publish
///
/// Poll failures are logged and do not fail the vehicle; the fetch that
/// follows can still succeed with the provider's last known data. Fetch
/// and read failures do.
async fn refresh_one(
    api: &dyn VehicleApi,
    record: &mut VehicleRecord,
    polling: PollingOption,
    cache: &DashMap<Vin, VehicleData>,
) -> Result<Option<VehicleData>, ApiError> {
    match polling {
        PollingOption::Disable => {}
        PollingOption::Enable => {
            if let ThrottleResult::Failed(err) =
                poll_vehicle(api, record, Duration::from_secs(POLL_INTERVAL)).await
            {
                warn!(vin = %record.vin, error = %err, "Vehicle poll failed");
            }
        }
        PollingOption::Charging => {
            // Decided from the previously published snapshot; a vehicle
            // that started charging is seen one cycle later
            let charging = cache
                .get(&record.vin)
                .map(|data| data.is_ev_charging())
                .unwrap_or(false);
            if charging {
                if let ThrottleResult::Failed(err) =
                    poll_vehicle(api, record, Duration::from_secs(POLL_INTERVAL_CHARGING)).await
                {
                    warn!(vin = %record.vin, error = %err, "Vehicle poll failed");
                }
            }
        }
    }

    if let ThrottleResult::Failed(err) =
        fetch_vehicle_data(api, record, Duration::from_secs(FETCH_INTERVAL)).await
    {
        return Err(err);
    }

    // A skipped fetch still reads the provider's current cache
    let data = api.get_data(&record.vin).await?;
    Ok((!data.is_empty()).then_some(data))
}
