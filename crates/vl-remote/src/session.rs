//! The owned session object holding per-vehicle state

use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use vl_api::VehicleApi;
use vl_core::{RemoteCommand, SessionOptions, VehicleRecord, Vin};
use vl_event_bus::{EventBus, SharedEventBus};
use vl_notify::{NotificationManager, SharedNotificationManager};

use crate::catalog;

/// One authenticated account session
///
/// Owns the vehicle-record collection, the event bus and notification
/// sink the dispatcher reports through, and the current option values.
/// Each record sits behind its own async mutex: holding it across a
/// vehicle's own poll/fetch serializes remote operations per vehicle,
/// while different vehicles proceed independently.
pub struct VehicleSession {
    api: Arc<dyn VehicleApi>,
    vehicles: DashMap<Vin, Arc<Mutex<VehicleRecord>>>,
    bus: SharedEventBus,
    notifications: SharedNotificationManager,
    options: RwLock<SessionOptions>,
}

impl std::fmt::Debug for VehicleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VehicleSession")
            .field("vehicles", &self.vehicles.len())
            .finish_non_exhaustive()
    }
}

impl VehicleSession {
    /// Create an empty session around an API handle
    pub fn new(api: Arc<dyn VehicleApi>, options: SessionOptions) -> Self {
        Self {
            api,
            vehicles: DashMap::new(),
            bus: Arc::new(EventBus::new()),
            notifications: Arc::new(NotificationManager::new()),
            options: RwLock::new(options),
        }
    }

    /// The cloud API handle
    pub fn api(&self) -> &Arc<dyn VehicleApi> {
        &self.api
    }

    /// The session event bus
    pub fn bus(&self) -> &SharedEventBus {
        &self.bus
    }

    /// The session notification sink
    pub fn notifications(&self) -> &SharedNotificationManager {
        &self.notifications
    }

    /// Add a vehicle record, returning its shared handle
    ///
    /// Replaces any existing record for the same VIN.
    pub fn insert_vehicle(&self, record: VehicleRecord) -> Arc<Mutex<VehicleRecord>> {
        let vin = record.vin.clone();
        let handle = Arc::new(Mutex::new(record));
        self.vehicles.insert(vin, handle.clone());
        handle
    }

    /// Look up a vehicle record handle by VIN
    pub fn vehicle(&self, vin: &Vin) -> Option<Arc<Mutex<VehicleRecord>>> {
        self.vehicles.get(vin).map(|r| r.value().clone())
    }

    /// Handles for every vehicle in the session
    ///
    /// Collected eagerly so callers never await a record lock while
    /// holding a map shard.
    pub fn vehicle_handles(&self) -> Vec<(Vin, Arc<Mutex<VehicleRecord>>)> {
        self.vehicles
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    /// Number of vehicles in the session
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Point-in-time clones of every vehicle record
    pub async fn records(&self) -> Vec<VehicleRecord> {
        let mut records = Vec::with_capacity(self.vehicles.len());
        for (_, handle) in self.vehicle_handles() {
            records.push(handle.lock().await.clone());
        }
        records
    }

    /// Current option values; read per-invocation, never cached
    pub async fn options(&self) -> SessionOptions {
        *self.options.read().await
    }

    /// Replace the option values
    pub async fn set_options(&self, options: SessionOptions) {
        *self.options.write().await = options;
    }

    /// The named services this session should expose: the union of every
    /// vehicle's capability-derived catalog
    pub async fn supported_services(&self) -> BTreeSet<RemoteCommand> {
        catalog::supported_services(self.records().await.iter())
    }
}
