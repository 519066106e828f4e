//! Capability-driven service catalog

use std::collections::BTreeSet;

use vl_core::{RemoteCommand, VehicleCapabilities, VehicleRecord};

/// The named services one vehicle's capabilities justify
///
/// `Lock`/`Unlock` are absent on purpose: the host platform exposes those
/// through its lock entity, not as named services. They are still checked
/// at dispatch time via [`supports_command`].
pub fn vehicle_services(capabilities: &VehicleCapabilities) -> BTreeSet<RemoteCommand> {
    let mut services = BTreeSet::new();

    if capabilities.has_safety_subscription {
        services.insert(RemoteCommand::Fetch);
    }
    if capabilities.has_remote_service {
        services.insert(RemoteCommand::Horn);
        services.insert(RemoteCommand::HornStop);
        services.insert(RemoteCommand::Lights);
        services.insert(RemoteCommand::LightsStop);
        services.insert(RemoteCommand::PollVehicle);
    }
    if capabilities.has_remote_start || capabilities.has_ev {
        services.insert(RemoteCommand::RemoteStart);
        services.insert(RemoteCommand::RemoteStop);
    }
    if capabilities.has_ev {
        services.insert(RemoteCommand::ChargeStart);
    }

    services
}

/// The services a whole session should register: the union across its
/// vehicles
///
/// A mixed-capability session exposes the superset; a command invalid for
/// a particular vehicle is rejected at dispatch time, not filtered here.
pub fn supported_services<'a>(
    records: impl IntoIterator<Item = &'a VehicleRecord>,
) -> BTreeSet<RemoteCommand> {
    records
        .into_iter()
        .flat_map(|record| vehicle_services(&record.capabilities))
        .collect()
}

/// Dispatch-time check: may this command be sent to this vehicle?
pub fn supports_command(capabilities: &VehicleCapabilities, command: RemoteCommand) -> bool {
    match command {
        RemoteCommand::Fetch => capabilities.has_safety_subscription,
        RemoteCommand::PollVehicle
        | RemoteCommand::Lock
        | RemoteCommand::Unlock
        | RemoteCommand::Horn
        | RemoteCommand::HornStop
        | RemoteCommand::Lights
        | RemoteCommand::LightsStop => capabilities.has_remote_service,
        RemoteCommand::RemoteStart | RemoteCommand::RemoteStop => {
            capabilities.has_remote_start || capabilities.has_ev
        }
        RemoteCommand::ChargeStart => capabilities.has_ev,
    }
}
