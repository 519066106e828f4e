//! Scripted fake of the cloud API for unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use vl_api::{ApiError, ApiResult, VehicleApi, VehicleData};
use vl_core::{UnlockDoor, Vin};

/// A `VehicleApi` fake that logs every call and returns scripted responses
///
/// Each call is recorded as `"<method> <vin> [...]"`; assertions count
/// calls by method name. All responses default to `Ok(true)`.
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    update_response: Mutex<ApiResult<bool>>,
    fetch_response: Mutex<ApiResult<bool>>,
    command_response: Mutex<ApiResult<bool>>,
    data: Mutex<HashMap<Vin, VehicleData>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            update_response: Mutex::new(Ok(true)),
            fetch_response: Mutex::new(Ok(true)),
            command_response: Mutex::new(Ok(true)),
            data: Mutex::new(HashMap::new()),
        }
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Count calls whose method name equals `method`
    pub fn calls_matching(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split_whitespace().next() == Some(method))
            .count()
    }

    pub fn set_update_response(&self, confirmed: bool) {
        *self.update_response.lock().unwrap() = Ok(confirmed);
    }

    pub fn fail_update(&self, err: ApiError) {
        *self.update_response.lock().unwrap() = Err(err);
    }

    pub fn fail_fetch(&self, err: ApiError) {
        *self.fetch_response.lock().unwrap() = Err(err);
    }

    pub fn set_command_response(&self, confirmed: bool) {
        *self.command_response.lock().unwrap() = Ok(confirmed);
    }

    pub fn fail_commands(&self, err: ApiError) {
        *self.command_response.lock().unwrap() = Err(err);
    }

    pub fn set_data(&self, vin: Vin, data: VehicleData) {
        self.data.lock().unwrap().insert(vin, data);
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
        Ok(())
    }

    fn get_vehicles(&self) -> Vec<Vin> {
        self.data.lock().unwrap().keys().cloned().collect()
    }

    fn get_ev_status(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(false)
    }

    fn get_res_status(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(false)
    }

    fn get_remote_status(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(false)
    }

    fn get_safety_status(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(true)
    }

    async fn has_lock_status(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(false)
    }

    async fn has_power_windows(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(false)
    }

    fn has_sunroof(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(false)
    }

    fn has_tpms(&self, _vin: &Vin) -> ApiResult<bool> {
        Ok(false)
    }

    fn get_model_name(&self, _vin: &Vin) -> ApiResult<String> {
        Ok("Crosstrek".to_string())
    }

    fn get_model_year(&self, _vin: &Vin) -> ApiResult<String> {
        Ok("2023".to_string())
    }

    fn vin_to_name(&self, vin: &Vin) -> ApiResult<String> {
        Ok(format!("Vehicle {vin}"))
    }

    fn get_api_gen(&self, _vin: &Vin) -> ApiResult<String> {
        Ok("g2".to_string())
    }

    async fn update(&self, vin: &Vin, force: bool) -> ApiResult<bool> {
        self.log(format!("update {vin} force={force}"));
        self.update_response.lock().unwrap().clone()
    }

    async fn fetch(&self, vin: &Vin, force: bool) -> ApiResult<bool> {
        self.log(format!("fetch {vin} force={force}"));
        self.fetch_response.lock().unwrap().clone()
    }

    async fn get_data(&self, vin: &Vin) -> ApiResult<VehicleData> {
        self.log(format!("get_data {vin}"));
        Ok(self
            .data
            .lock()
            .unwrap()
            .get(vin)
            .cloned()
            .unwrap_or_default())
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
