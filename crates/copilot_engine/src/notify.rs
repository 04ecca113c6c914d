//! Notification events.
//!
//! Fire-and-forget: events fan out over a broadcast channel to whatever
//! sinks are attached (log bridge, SSE stream). A lagging or closed receiver
//! never gates a controller.

use copilot_core::{CampaignCategory, Resource};
use serde::Serialize;

use crate::depart::DepartSummary;

/// Best-effort UI refresh hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTarget {
    Bunker,
    Vessels,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Purchased {
        resource: Resource,
        amount: u64,
        price: f64,
        cost: f64,
    },
    PurchaseFailed {
        resource: Resource,
        message: String,
    },
    DepartPass {
        summary: DepartSummary,
    },
    DepartPaused {
        reason: String,
    },
    DepartResumed,
    CampaignActivated {
        category: CampaignCategory,
        name: String,
        price: f64,
    },
    CampaignFailed {
        category: CampaignCategory,
        message: String,
    },
    PassFailed {
        feature: &'static str,
        message: String,
    },
    Refresh {
        target: RefreshTarget,
    },
}
