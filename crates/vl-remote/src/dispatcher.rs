//! Remote command dispatcher
//!
//! Runs one named command against one vehicle with consistent notification
//! and event semantics: pending notification (policy permitting) and a
//! "command sent" event up front, the command itself, an unconditional
//! forced data fetch so entity state reflects what just happened, then a
//! result notification and a "succeeded"/"failed" event. Failures always
//! reach the caller; nothing is swallowed here.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use vl_api::ApiError;
use vl_core::events::{CommandFailedData, CommandSentData, CommandSucceededData};
use vl_core::{NotificationOption, RemoteCommand, UnlockDoor, Vin, DOMAIN};

use crate::session::VehicleSession;
use crate::throttle::{fetch_vehicle_data, poll_vehicle, ThrottleResult};
use crate::catalog::supports_command;

/// Notification title used for all command notifications
const NOTIFICATION_TITLE: &str = "Vehiclelink";

/// Optional argument to a remote command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// Door group for `Unlock`
    Door(UnlockDoor),
    /// Climate preset name for `RemoteStart`
    ClimatePreset(String),
}

/// Errors returned by the command dispatcher
///
/// The first three are validation failures raised before any API call,
/// notification, or event; `Failed` is the terminal failure state after a
/// command was actually attempted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown vehicle: {0}")]
    UnknownVehicle(Vin),

    #[error("vehicle {vin} does not support the {command} command")]
    UnsupportedCommand { vin: Vin, command: RemoteCommand },

    #[error("no climate preset selected for {0}")]
    NoClimatePreset(Vin),

    #[error("{command} command failed for {car_name}: {message}")]
    Failed {
        command: RemoteCommand,
        car_name: String,
        message: String,
    },
}

/// Execute a remote command against one vehicle
///
/// The vehicle's record stays locked for the duration, so commands to the
/// same vehicle serialize and cannot interleave with its refresh-cycle
/// poll/fetch.
pub async fn execute_command(
    session: &VehicleSession,
    vin: &Vin,
    command: RemoteCommand,
    arg: Option<CommandArg>,
) -> Result<(), CommandError> {
    let handle = session
        .vehicle(vin)
        .ok_or_else(|| CommandError::UnknownVehicle(vin.clone()))?;
    let mut record = handle.lock().await;

    if !supports_command(&record.capabilities, command) {
        return Err(CommandError::UnsupportedCommand {
            vin: vin.clone(),
            command,
        });
    }

    // Resolve the remote-start preset up front so a missing one is a
    // validation failure, not a mid-flight command failure.
    let explicit_preset = match &arg {
        Some(CommandArg::ClimatePreset(name)) => Some(name.clone()),
        _ => None,
    };
    let preset = if command == RemoteCommand::RemoteStart {
        Some(
            explicit_preset
                .clone()
                .or_else(|| record.selected_climate_preset.clone())
                .ok_or_else(|| CommandError::NoClimatePreset(vin.clone()))?,
        )
    } else {
        None
    };

    let car_name = record.display_name.clone();
    let notify = session.options().await.notification;
    let api = session.api().clone();

    if matches!(
        notify,
        NotificationOption::Pending | NotificationOption::Success
    ) {
        session.notifications().create(
            DOMAIN,
            format!("Sending {command} command to {car_name}\nThis may take 10-15 seconds"),
            Some(NOTIFICATION_TITLE.to_string()),
        );
    }
    session.bus().fire_typed(CommandSentData {
        command,
        car_name: car_name.clone(),
    });
    debug!(command = %command, car_name = %car_name, "Sending remote command");

    let command_result: Result<bool, ApiError> = match command {
        // The actual refresh happens in the forced post-command fetch
        RemoteCommand::Fetch => Ok(true),
        RemoteCommand::PollVehicle => poll_vehicle(api.as_ref(), &mut record, Duration::ZERO)
            .await
            .into_result(),
        RemoteCommand::Lock => api.lock(vin).await,
        RemoteCommand::Unlock => {
            let door = match arg {
                Some(CommandArg::Door(door)) => door,
                _ => UnlockDoor::default(),
            };
            api.unlock(vin, door).await
        }
        RemoteCommand::Horn => api.horn(vin).await,
        RemoteCommand::HornStop => api.horn_stop(vin).await,
        RemoteCommand::Lights => api.lights(vin).await,
        RemoteCommand::LightsStop => api.lights_stop(vin).await,
        RemoteCommand::RemoteStart => {
            let preset = preset.as_deref().unwrap_or_default();
            api.remote_start(vin, preset).await
        }
        RemoteCommand::RemoteStop => api.remote_stop(vin).await,
        RemoteCommand::ChargeStart => api.charge_start(vin).await,
    };

    // Forced fetch regardless of command outcome, so subsequent reads see
    // server state. Its failure must not mask the command's own result.
    if let ThrottleResult::Failed(err) =
        fetch_vehicle_data(api.as_ref(), &mut record, Duration::ZERO).await
    {
        warn!(vin = %vin, error = %err, "Post-command data fetch failed");
    }

    if matches!(
        notify,
        NotificationOption::Pending | NotificationOption::Success
    ) {
        session.notifications().dismiss(DOMAIN);
    }

    let (success, err_msg) = match command_result {
        Ok(true) => (true, String::new()),
        Ok(false) => (
            false,
            "command was not confirmed by the cloud service".to_string(),
        ),
        Err(err) => (false, err.message().to_string()),
    };

    if success {
        if command == RemoteCommand::RemoteStart {
            if let Some(name) = explicit_preset {
                record.selected_climate_preset = Some(name);
            }
        }
        if notify == NotificationOption::Success {
            session.notifications().create_auto(
                format!("{command} command successfully completed for {car_name}"),
                Some(NOTIFICATION_TITLE.to_string()),
            );
        }
        session.bus().fire_typed(CommandSucceededData {
            command,
            car_name: car_name.clone(),
        });
        debug!(command = %command, car_name = %car_name, "Remote command completed");
        return Ok(());
    }

    if notify != NotificationOption::Disable {
        session.notifications().create_auto(
            format!("{command} command failed for {car_name}: {err_msg}"),
            Some(NOTIFICATION_TITLE.to_string()),
        );
    }
    session.bus().fire_typed(CommandFailedData {
        command,
        car_name: car_name.clone(),
        message: err_msg.clone(),
    });
    Err(CommandError::Failed {
        command,
        car_name,
        message: err_msg,
    })
}
