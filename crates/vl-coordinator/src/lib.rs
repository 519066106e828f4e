//! Periodic data refresh and shared vehicle cache
//!
//! This crate drives the integration's steady state: connect a session,
//! wrap it in a [`DataCoordinator`], spawn [`DataCoordinator::run`], and
//! read published snapshots per VIN. Remote commands go through
//! [`DataCoordinator::execute_command`] so the cache is republished right
//! after.

mod coordinator;
mod refresh;
mod setup;

pub use coordinator::{DataCoordinator, SelectError};
pub use refresh::UpdateFailed;
pub use setup::{connect_session, SetupError};
