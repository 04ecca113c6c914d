//! `copilot_engine` — the AutoPilot decision-and-scheduling engine.
//!
//! Drives the rebuy, depart, and campaign controllers against an
//! [`ActionGateway`](copilot_client::ActionGateway), under cooldowns,
//! in-flight gates, and jittered cadences. All controller state lives on the
//! [`AutoPilot`] session; nothing is global.

mod campaigns;
mod config;
mod depart;
mod notify;
mod rebuy;
pub mod scheduler;
mod session;

pub use config::AutopilotSettings;
pub use depart::{DepartSummary, DepartedVessel, SkippedVessel};
pub use notify::{Notification, RefreshTarget};
pub use session::{AutoPilot, CooldownStatus, LastRuns, StatusReport};
