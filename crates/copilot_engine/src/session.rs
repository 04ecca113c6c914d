//! The AutoPilot session object.
//!
//! Owns every piece of controller state — gates, cooldowns, pause reason,
//! last pass summary — so independent sessions never share anything.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use copilot_client::ActionGateway;
use copilot_core::{CooldownTracker, Resource, ResourceGate};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::depart::DepartSummary;
use crate::notify::{Notification, RefreshTarget};
use crate::AutopilotSettings;

/// Window after a successful purchase during which the same resource is not
/// bought again, independent of how often prices update.
pub(crate) const PURCHASE_COOLDOWN: Duration = Duration::from_secs(180);

/// Minimum gap between two refresh requests for the same UI target.
const REFRESH_DEBOUNCE: Duration = Duration::from_secs(2);

const NOTIFY_CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
struct ResourceGates {
    fuel: ResourceGate,
    co2: ResourceGate,
}

impl ResourceGates {
    fn get_mut(&mut self, resource: Resource) -> &mut ResourceGate {
        match resource {
            Resource::Fuel => &mut self.fuel,
            Resource::Co2 => &mut self.co2,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FeatureStamps {
    pub depart: Option<Instant>,
    pub campaigns: Option<Instant>,
    pub bunker: Option<Instant>,
}

pub struct AutoPilot {
    pub(crate) gateway: Arc<dyn ActionGateway>,
    configured: AutopilotSettings,
    active: RwLock<AutopilotSettings>,
    pub(crate) cooldowns: Mutex<CooldownTracker>,
    gates: Mutex<ResourceGates>,
    pub(crate) pause_reason: Mutex<Option<String>>,
    pub(crate) last_depart: Mutex<Option<DepartSummary>>,
    pub(crate) stamps: Mutex<FeatureStamps>,
    refresh_sent: Mutex<HashMap<RefreshTarget, Instant>>,
    notify_tx: broadcast::Sender<Notification>,
}

impl AutoPilot {
    pub fn new(gateway: Arc<dyn ActionGateway>, settings: AutopilotSettings) -> Self {
        let (notify_tx, _) = broadcast::channel(NOTIFY_CHANNEL_CAPACITY);
        Self {
            gateway,
            active: RwLock::new(settings.clone()),
            configured: settings,
            cooldowns: Mutex::new(CooldownTracker::new(PURCHASE_COOLDOWN)),
            gates: Mutex::new(ResourceGates::default()),
            pause_reason: Mutex::new(None),
            last_depart: Mutex::new(None),
            stamps: Mutex::new(FeatureStamps::default()),
            refresh_sent: Mutex::new(HashMap::new()),
            notify_tx,
        }
    }

    /// The settings currently in force (may be the paused, all-off form).
    pub fn settings(&self) -> AutopilotSettings {
        self.active.read().clone()
    }

    /// Turn every feature flag off. Thresholds and the configured values are
    /// kept; `resume` restores them.
    pub fn pause(&self) {
        *self.active.write() = self.configured.disabled();
        tracing::info!("autopilot paused");
    }

    pub fn resume(&self) {
        *self.active.write() = self.configured.clone();
        tracing::info!("autopilot resumed");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }

    pub(crate) fn notify(&self, notification: Notification) {
        tracing::info!(?notification, "autopilot event");
        let _ = self.notify_tx.send(notification);
    }

    /// Debounced best-effort UI refresh request.
    pub(crate) fn request_refresh(&self, target: RefreshTarget) {
        let now = Instant::now();
        let mut sent = self.refresh_sent.lock();
        if sent
            .get(&target)
            .is_some_and(|last| now.duration_since(*last) < REFRESH_DEBOUNCE)
        {
            return;
        }
        sent.insert(target, now);
        drop(sent);
        let _ = self.notify_tx.send(Notification::Refresh { target });
    }

    /// Acquire the purchase gate for a resource. `None` means a purchase is
    /// already in flight and the caller silently no-ops. The permit releases
    /// the gate on drop, so the clear path runs on every exit.
    pub(crate) fn try_acquire_gate(&self, resource: Resource) -> Option<GatePermit<'_>> {
        if self.gates.lock().get_mut(resource).try_begin() {
            Some(GatePermit {
                pilot: self,
                resource,
            })
        } else {
            None
        }
    }

    pub fn status(&self) -> StatusReport {
        let now = Instant::now();
        let cooldowns = self.cooldowns.lock();
        let stamps = self.stamps.lock();
        let secs_ago = |stamp: Option<Instant>| stamp.map(|s| now.duration_since(s).as_secs());
        StatusReport {
            settings: self.settings(),
            depart_pause_reason: self.pause_reason.lock().clone(),
            cooldowns: CooldownStatus {
                fuel_secs: cooldowns
                    .remaining(Resource::Fuel, now)
                    .map(|d| d.as_secs()),
                co2_secs: cooldowns.remaining(Resource::Co2, now).map(|d| d.as_secs()),
            },
            last_runs: LastRuns {
                depart_secs_ago: secs_ago(stamps.depart),
                campaigns_secs_ago: secs_ago(stamps.campaigns),
                bunker_secs_ago: secs_ago(stamps.bunker),
            },
            last_depart: self.last_depart.lock().clone(),
        }
    }

    /// One pass of every feature, for `--once` mode and tests.
    pub async fn run_once(&self) {
        self.poll_bunker().await;
        self.run_depart_pass().await;
        self.run_campaign_pass().await;
    }
}

pub(crate) struct GatePermit<'a> {
    pilot: &'a AutoPilot,
    resource: Resource,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.pilot.gates.lock().get_mut(self.resource).finish();
    }
}

// ---------------------------------------------------------------------------
// Status reporting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CooldownStatus {
    pub fuel_secs: Option<u64>,
    pub co2_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LastRuns {
    pub depart_secs_ago: Option<u64>,
    pub campaigns_secs_ago: Option<u64>,
    pub bunker_secs_ago: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub settings: AutopilotSettings,
    pub depart_pause_reason: Option<String>,
    pub cooldowns: CooldownStatus,
    pub last_runs: LastRuns,
    pub last_depart: Option<DepartSummary>,
}
