//! Rebuy controller — reactive, price-driven bunker purchases.

use std::time::Instant;

use copilot_core::{plan_purchase, BunkerSnapshot, Resource};

use crate::notify::{Notification, RefreshTarget};
use crate::session::AutoPilot;
use crate::AutopilotSettings;

/// Threshold the resource must be at or under to buy, or `None` when the
/// feature is off for that resource. A boolean flag selects between the
/// shared price-alert value and the resource-specific override.
fn rebuy_threshold(settings: &AutopilotSettings, resource: Resource) -> Option<f64> {
    match resource {
        Resource::Fuel if settings.auto_rebuy_fuel => Some(if settings.fuel_use_alert {
            settings.fuel_alert_price
        } else {
            settings.fuel_threshold
        }),
        Resource::Co2 if settings.auto_rebuy_co2 => Some(if settings.co2_use_alert {
            settings.co2_alert_price
        } else {
            settings.co2_threshold
        }),
        _ => None,
    }
}

impl AutoPilot {
    /// Reactive entry point: invoked with every fresh bunker snapshot, not
    /// on a timer of its own.
    pub async fn on_bunker_update(&self, snapshot: &BunkerSnapshot) {
        for resource in Resource::ALL {
            self.consider_rebuy(resource, snapshot).await;
        }
    }

    async fn consider_rebuy(&self, resource: Resource, snapshot: &BunkerSnapshot) {
        let settings = self.settings();
        let Some(threshold) = rebuy_threshold(&settings, resource) else {
            return;
        };
        if self.cooldowns.lock().active(resource, Instant::now()) {
            tracing::debug!(resource = resource.label(), "purchase on cooldown");
            return;
        }
        let Some(amount) = plan_purchase(
            snapshot.price(resource),
            threshold,
            snapshot.current(resource),
            snapshot.capacity(resource),
            snapshot.cash,
        ) else {
            return;
        };
        // Silent no-op when a purchase for this resource is still in flight;
        // the permit clears the gate on every exit path below.
        let Some(_permit) = self.try_acquire_gate(resource) else {
            tracing::debug!(resource = resource.label(), "purchase already in flight");
            return;
        };

        let price = snapshot.price(resource);
        match self.gateway.purchase(resource, amount).await {
            Ok(()) => {
                self.cooldowns.lock().start(resource, Instant::now());
                self.notify(Notification::Purchased {
                    resource,
                    amount,
                    price,
                    cost: price * amount as f64,
                });
                self.request_refresh(RefreshTarget::Bunker);
            }
            Err(err) => {
                // Cooldown untouched — retry is possible on the next price
                // update.
                tracing::warn!(resource = resource.label(), error = %err, "purchase failed");
                self.notify(Notification::PurchaseFailed {
                    resource,
                    message: err.to_string(),
                });
            }
        }
    }

    /// Poll the bunker panel and feed the snapshot into the reactive hook.
    pub async fn poll_bunker(&self) {
        self.stamps.lock().bunker = Some(Instant::now());
        match self.gateway.fetch_bunker().await {
            Ok(snapshot) => {
                self.request_refresh(RefreshTarget::Bunker);
                self.on_bunker_update(&snapshot).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "bunker poll failed");
                self.notify(Notification::PassFailed {
                    feature: "bunker poll",
                    message: err.to_string(),
                });
            }
        }
    }
}
