//! Shared test fixtures: a scriptable cloud API fake
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

use vl_api::{ApiError, ApiResult, VehicleApi, VehicleData, STATUS_EV_CHARGER_STATE};
use vl_core::{UnlockDoor, VehicleCapabilities, Vin};

/// One scripted vehicle on the fake account
pub struct FakeVehicle {
    pub name: String,
    pub capabilities: VehicleCapabilities,
    pub api_gen: String,
    pub data: VehicleData,
}

/// A `VehicleApi` fake backed by scripted vehicles
///
/// Logs every remote call as `"<method> <vin>"` so tests can count calls
/// per method and per vehicle. Failures are scripted per VIN for
/// update/fetch and globally for commands and connect.
pub struct FakeApi {
    vehicles: Mutex<Vec<(Vin, FakeVehicle)>>,
    calls: Mutex<Vec<String>>,
    connect_response: Mutex<ApiResult<()>>,
    command_response: Mutex<ApiResult<bool>>,
    update_failures: Mutex<HashMap<Vin, ApiError>>,
    fetch_failures: Mutex<HashMap<Vin, ApiError>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            vehicles: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            connect_response: Mutex::new(Ok(())),
            command_response: Mutex::new(Ok(true)),
            update_failures: Mutex::new(HashMap::new()),
            fetch_failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_vehicle(&self, vin: &str, name: &str, capabilities: VehicleCapabilities) -> Vin {
        let vin = Vin::new(vin).unwrap();
        self.vehicles.lock().unwrap().push((
            vin.clone(),
            FakeVehicle {
                name: name.to_string(),
                capabilities,
                api_gen: "g2".to_string(),
                data: VehicleData::default(),
            },
        ));
        vin
    }

    pub fn set_data(&self, vin: &Vin, data: VehicleData) {
        let mut vehicles = self.vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|(v, _)| v == vin)
            .map(|(_, vehicle)| vehicle)
            .expect("unknown fake vehicle");
        vehicle.data = data;
    }

    pub fn fail_connect(&self, err: ApiError) {
        *self.connect_response.lock().unwrap() = Err(err);
    }

    pub fn fail_commands(&self, err: ApiError) {
        *self.command_response.lock().unwrap() = Err(err);
    }

    pub fn fail_update(&self, vin: &Vin, err: ApiError) {
        self.update_failures.lock().unwrap().insert(vin.clone(), err);
    }

    pub fn fail_fetch(&self, vin: &Vin, err: ApiError) {
        self.fetch_failures.lock().unwrap().insert(vin.clone(), err);
    }

    pub fn clear_fetch_failures(&self) {
        self.fetch_failures.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Count calls by method name
    pub fn calls_matching(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split_whitespace().next() == Some(method))
            .count()
    }

    /// Count calls by method name and VIN
    pub fn calls_for(&self, method: &str, vin: &Vin) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| {
                let mut parts = call.split_whitespace();
                parts.next() == Some(method) && parts.next() == Some(vin.as_str())
            })
            .count()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn with_vehicle<T>(
        &self,
        vin: &Vin,
        f: impl FnOnce(&FakeVehicle) -> T,
    ) -> ApiResult<T> {
        let vehicles = self.vehicles.lock().unwrap();
        vehicles
            .iter()
            .find(|(v, _)| v == vin)
            .map(|(_, vehicle)| f(vehicle))
            .ok_or_else(|| ApiError::VehicleNotFound(vin.to_string()))
    }

    fn command(&self, call: String) -> ApiResult<bool> {
        self.log(call);
        self.command_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl VehicleApi for FakeApi {
    async fn connect(&self) -> ApiResult<()> {
        self.log("connect".to_string());
        self.connect_response.lock().unwrap().clone()
    }

    fn get_vehicles(&self) -> Vec<Vin> {
        self.vehicles
            .lock()
            .unwrap()
            .iter()
            .map(|(vin, _)| vin.clone())
            .collect()
    }

    fn get_ev_status(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_ev)
    }

    fn get_res_status(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_remote_start)
    }

    fn get_remote_status(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_remote_service)
    }

    fn get_safety_status(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_safety_subscription)
    }

    async fn has_lock_status(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_lock_status)
    }

    async fn has_power_windows(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_power_windows)
    }

    fn has_sunroof(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_sunroof)
    }

    fn has_tpms(&self, vin: &Vin) -> ApiResult<bool> {
        self.with_vehicle(vin, |v| v.capabilities.has_tpms)
    }

    fn get_model_name(&self, _vin: &Vin) -> ApiResult<String> {
        Ok("Outback".to_string())
    }

    fn get_model_year(&self, _vin: &Vin) -> ApiResult<String> {
        Ok("2023".to_string())
    }

    fn vin_to_name(&self, vin: &Vin) -> ApiResult<String> {
        self.with_vehicle(vin, |v| v.name.clone())
    }

    fn get_api_gen(&self, vin: &Vin) -> ApiResult<String> {
        self.with_vehicle(vin, |v| v.api_gen.clone())
    }

    async fn update(&self, vin: &Vin, force: bool) -> ApiResult<bool> {
        self.log(format!("update {vin} force={force}"));
        if let Some(err) = self.update_failures.lock().unwrap().get(vin) {
            return Err(err.clone());
        }
        Ok(true)
    }

    async fn fetch(&self, vin: &Vin, force: bool) -> ApiResult<bool> {
        self.log(format!("fetch {vin} force={force}"));
        if let Some(err) = self.fetch_failures.lock().unwrap().get(vin) {
            return Err(err.clone());
        }
        Ok(true)
    }

    async fn get_data(&self, vin: &Vin) -> ApiResult<VehicleData> {
        self.log(format!("get_data {vin}"));
        self.with_vehicle(vin, |v| v.data.clone())
    }

    async fn lock(&self, vin: &Vin) -> ApiResult<bool> {
        self.command(format!("lock {vin}"))
    }

    async fn unlock(&self, vin: &Vin, door: UnlockDoor) -> ApiResult<bool> {
        self.command(format!("unlock {vin} {door:?}"))
    }

    async fn horn(&self, vin: &Vin) -> ApiResult<bool> {
        self.command(format!("horn {vin}"))
    }

    async fn horn_stop(&self, vin: &Vin) -> ApiResult<bool> {
        self.command(format!("horn_stop {vin}"))
    }

    async fn lights(&self, vin: &Vin) -> ApiResult<bool> {
        self.command(format!("lights {vin}"))
    }

    async fn lights_stop(&self, vin: &Vin) -> ApiResult<bool> {
        self.command(format!("lights_stop {vin}"))
    }

    async fn remote_start(&self, vin: &Vin, preset_name: &str) -> ApiResult<bool> {
        self.command(format!("remote_start {vin} {preset_name}"))
    }

    async fn remote_stop(&self, vin: &Vin) -> ApiResult<bool> {
        self.command(format!("remote_stop {vin}"))
    }

    async fn charge_start(&self, vin: &Vin) -> ApiResult<bool> {
        self.command(format!("charge_start {vin}"))
    }
}

/// A populated status snapshot; `charging` controls the EV charger state
pub fn snapshot(charging: bool) -> VehicleData {
    let mut data = VehicleData::default();
    data.status.insert("ODOMETER".to_string(), json!(120534));
    data.status.insert("AVG_FUEL_CONSUMPTION".to_string(), json!(5.1));
    data.status.insert(
        STATUS_EV_CHARGER_STATE.to_string(),
        json!(if charging { "CHARGING" } else { "CHARGING_STOPPED" }),
    );
    data
}

/// Capabilities of a typical gen-2 vehicle with every subscription
pub fn full_capabilities() -> VehicleCapabilities {
    VehicleCapabilities {
        has_ev: true,
        has_remote_start: true,
        has_remote_service: true,
        has_safety_subscription: true,
        has_lock_status: true,
        has_power_windows: true,
        has_sunroof: false,
        has_tpms: true,
    }
}

/// Capabilities of a vehicle with only the safety subscription
pub fn safety_only_capabilities() -> VehicleCapabilities {
    VehicleCapabilities {
        has_safety_subscription: true,
        ..Default::default()
    }
}
