//! Depart controller — one allocation pass per cadence firing.

use std::time::Instant;

use copilot_core::{plan_departures, DepartureOrder, DeparturePlan, PortCode, VesselId};
use serde::Serialize;

use crate::notify::{Notification, RefreshTarget};
use crate::session::AutoPilot;

#[derive(Debug, Clone, Serialize)]
pub struct DepartedVessel {
    pub vessel_id: VesselId,
    pub name: String,
    pub destination: PortCode,
    pub cargo: u32,
    pub income: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedVessel {
    pub vessel_id: VesselId,
    pub name: String,
    pub reason: String,
}

/// Combined report of one pass: successes and skip reasons together, built
/// after all groups are processed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DepartSummary {
    pub departed: Vec<DepartedVessel>,
    pub skipped: Vec<SkippedVessel>,
    pub total_income: f64,
}

impl AutoPilot {
    pub async fn run_depart_pass(&self) {
        self.stamps.lock().depart = Some(Instant::now());

        let bunker = match self.gateway.fetch_bunker().await {
            Ok(b) => b,
            Err(err) => return self.depart_fetch_failed("bunker", &err),
        };
        let vessels = match self.gateway.fetch_vessels().await {
            Ok(v) => v,
            Err(err) => return self.depart_fetch_failed("vessels", &err),
        };
        let ports = match self.gateway.fetch_assigned_ports().await {
            Ok(p) => p,
            Err(err) => return self.depart_fetch_failed("ports", &err),
        };

        let settings = self.settings().depart_settings();
        match plan_departures(&vessels, &ports, bunker.fuel, &settings) {
            DeparturePlan::Paused { reason } => self.enter_depart_pause(reason),
            DeparturePlan::Pass { orders, skips } => {
                self.clear_depart_pause();
                let mut summary = DepartSummary::default();
                for skip in skips {
                    summary.skipped.push(SkippedVessel {
                        vessel_id: skip.vessel_id,
                        name: skip.vessel_name,
                        reason: skip.reason.to_string(),
                    });
                }
                // Strictly sequential: the server's demand ledger is shared
                // across these calls just like the planner's was.
                for order in orders {
                    self.execute_departure(order, &mut summary).await;
                }
                summary.total_income = summary.departed.iter().map(|d| d.income).sum();

                if !summary.departed.is_empty() {
                    self.request_refresh(RefreshTarget::Vessels);
                }
                let report = !summary.departed.is_empty() || !summary.skipped.is_empty();
                *self.last_depart.lock() = Some(summary.clone());
                if report {
                    self.notify(Notification::DepartPass { summary });
                }
            }
        }
    }

    async fn execute_departure(&self, order: DepartureOrder, summary: &mut DepartSummary) {
        match self
            .gateway
            .depart(order.vessel_id, order.speed, order.guards)
            .await
        {
            // Zero income/fuel/CO2 means the server no-opped the departure;
            // it must not count as departed.
            Ok(outcome) if outcome.is_noop() => summary.skipped.push(SkippedVessel {
                vessel_id: order.vessel_id,
                name: order.vessel_name,
                reason: "departure not executed (insufficient fuel or CO2)".to_string(),
            }),
            Ok(outcome) => summary.departed.push(DepartedVessel {
                vessel_id: order.vessel_id,
                name: order.vessel_name,
                destination: order.destination,
                cargo: order.cargo,
                income: outcome.depart_income,
            }),
            Err(err) => {
                tracing::warn!(vessel = order.vessel_id.0, error = %err, "depart call failed");
                summary.skipped.push(SkippedVessel {
                    vessel_id: order.vessel_id,
                    name: order.vessel_name,
                    reason: format!("departure failed: {err}"),
                });
            }
        }
    }

    /// Record the fuel-floor pause when it begins. The label is updated on
    /// later passes but the notification fires only on the state change.
    fn enter_depart_pause(&self, reason: String) {
        let mut current = self.pause_reason.lock();
        let newly_paused = current.is_none();
        *current = Some(reason.clone());
        drop(current);
        if newly_paused {
            tracing::info!(reason, "auto-depart paused");
            self.notify(Notification::DepartPaused { reason });
        }
    }

    fn clear_depart_pause(&self) {
        if self.pause_reason.lock().take().is_some() {
            tracing::info!("auto-depart resumed");
            self.notify(Notification::DepartResumed);
        }
    }

    fn depart_fetch_failed(&self, what: &str, err: &copilot_client::GatewayError) {
        tracing::warn!(what, error = %err, "depart pass fetch failed");
        self.notify(Notification::PassFailed {
            feature: "depart",
            message: format!("fetching {what}: {err}"),
        });
    }
}
