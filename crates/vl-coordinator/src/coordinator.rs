//! Shared data cache with periodic refresh

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use vl_api::VehicleData;
use vl_core::{RemoteCommand, Vin, FETCH_INTERVAL};
use vl_remote::{execute_command, CommandArg, CommandError, VehicleSession};

use crate::refresh::{refresh_all_vehicles, UpdateFailed};

/// Errors from selecting a climate preset
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("unknown vehicle: {0}")]
    UnknownVehicle(Vin),

    #[error("no data available for {0}")]
    NoData(Vin),

    #[error("'{name}' is not a climate preset of {vin}")]
    InvalidPreset { vin: Vin, name: String },
}

/// Periodic orchestrator and shared per-VIN data cache
///
/// Owns the published snapshots the entity layer reads. `refresh` runs
/// one cycle; `run` loops it on the fetch cadence until the task is
/// aborted. Listeners watch the generation counter to re-render after
/// each completed cycle.
pub struct DataCoordinator {
    session: Arc<VehicleSession>,
    cache: DashMap<Vin, VehicleData>,
    update_interval: Duration,
    last_update_success: AtomicBool,
    generation: watch::Sender<u64>,
}

impl DataCoordinator {
    /// Create a coordinator on the default fetch cadence
    pub fn new(session: Arc<VehicleSession>) -> Arc<Self> {
        Self::with_interval(session, Duration::from_secs(FETCH_INTERVAL))
    }

    /// Create a coordinator with a custom cadence
    pub fn with_interval(session: Arc<VehicleSession>, update_interval: Duration) -> Arc<Self> {
        let (generation, _) = watch::channel(0);
        Arc::new(Self {
            session,
            cache: DashMap::new(),
            update_interval,
            last_update_success: AtomicBool::new(true),
            generation,
        })
    }

    /// The session this coordinator refreshes
    pub fn session(&self) -> &Arc<VehicleSession> {
        &self.session
    }

    /// Run one refresh cycle and publish results
    ///
    /// Updates `last_update_success` and bumps the generation counter
    /// whether the cycle succeeded or not.
    pub async fn refresh(&self) -> Result<(), UpdateFailed> {
        let result = refresh_all_vehicles(&self.session, &self.cache).await;
        match &result {
            Ok(()) => debug!("Refresh cycle completed"),
            Err(err) => warn!(error = %err, "Refresh cycle failed"),
        }
        self.last_update_success
            .store(result.is_ok(), Ordering::SeqCst);
        self.generation.send_modify(|generation| *generation += 1);
        result
    }

    /// Loop `refresh` on the update interval until the task is aborted
    ///
    /// The first cycle runs immediately. Spawn with
    /// `tokio::spawn(coordinator.clone().run())` and abort the handle to
    /// stop.
    pub async fn run(self: Arc<Self>) {
        info!(interval = ?self.update_interval, "Starting refresh loop");
        let mut interval = tokio::time::interval(self.update_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let _ = self.refresh().await;
        }
    }

    /// Whether the most recent cycle succeeded
    pub fn last_update_success(&self) -> bool {
        self.last_update_success.load(Ordering::SeqCst)
    }

    /// The published snapshot for a VIN, if any
    pub fn data(&self, vin: &Vin) -> Option<VehicleData> {
        self.cache.get(vin).map(|r| r.value().clone())
    }

    /// VINs with published snapshots
    pub fn vins(&self) -> Vec<Vin> {
        self.cache.iter().map(|r| r.key().clone()).collect()
    }

    /// Watch completed refresh cycles
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    /// Dispatch a remote command, then refresh so published data reflects
    /// it
    ///
    /// A failed command propagates immediately without a publish pass;
    /// the next scheduled cycle still runs.
    pub async fn execute_command(
        &self,
        vin: &Vin,
        command: RemoteCommand,
        arg: Option<CommandArg>,
    ) -> Result<(), CommandError> {
        execute_command(&self.session, vin, command, arg).await?;
        let _ = self.refresh().await;
        Ok(())
    }

    /// Record a user's climate preset choice after validating it against
    /// the vehicle's published preset list
    pub async fn select_climate_preset(&self, vin: &Vin, name: &str) -> Result<(), SelectError> {
        let handle = self
            .session
            .vehicle(vin)
            .ok_or_else(|| SelectError::UnknownVehicle(vin.clone()))?;
        let data = self
            .data(vin)
            .ok_or_else(|| SelectError::NoData(vin.clone()))?;
        if !data.climate_presets.iter().any(|preset| preset == name) {
            return Err(SelectError::InvalidPreset {
                vin: vin.clone(),
                name: name.to_string(),
            });
        }

        debug!(vin = %vin, preset = %name, "Selecting climate preset");
        handle.lock().await.selected_climate_preset = Some(name.to_string());
        Ok(())
    }
}
