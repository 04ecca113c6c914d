//! Campaign controller — greedy renewal of inactive categories.

use std::time::Instant;

use copilot_core::plan_renewals;

use crate::notify::Notification;
use crate::session::AutoPilot;

impl AutoPilot {
    pub async fn run_campaign_pass(&self) {
        self.stamps.lock().campaigns = Some(Instant::now());

        let board = match self.gateway.fetch_campaigns().await {
            Ok(b) => b,
            Err(err) => return self.campaign_fetch_failed("campaigns", &err),
        };
        let bunker = match self.gateway.fetch_bunker().await {
            Ok(b) => b,
            Err(err) => return self.campaign_fetch_failed("bunker", &err),
        };

        // The planner already deducted each pick from a running cash
        // counter, so the picks are mutually budget-aware without re-polling
        // cash between activations.
        for campaign in plan_renewals(&board, bunker.cash) {
            match self.gateway.activate_campaign(campaign.id).await {
                Ok(()) => self.notify(Notification::CampaignActivated {
                    category: campaign.category,
                    name: campaign.name,
                    price: campaign.price,
                }),
                // Failures are independent per category; no rollback.
                Err(err) => {
                    tracing::warn!(
                        category = campaign.category.label(),
                        error = %err,
                        "campaign activation failed"
                    );
                    self.notify(Notification::CampaignFailed {
                        category: campaign.category,
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    fn campaign_fetch_failed(&self, what: &str, err: &copilot_client::GatewayError) {
        tracing::warn!(what, error = %err, "campaign pass fetch failed");
        self.notify(Notification::PassFailed {
            feature: "campaigns",
            message: format!("fetching {what}: {err}"),
        });
    }
}
