//! Marketing campaign renewal selection.

use crate::types::{Campaign, CampaignBoard, CampaignCategory};

/// Pick campaigns to renew, one per inactive category.
///
/// Per category the most expensive affordable campaign wins (price
/// descending is the sole ranking key); its price is deducted from a local
/// running cash counter before the next category is considered, so
/// sequential purchases in one pass are mutually budget-aware without
/// re-polling cash. Categories with nothing affordable are skipped silently.
pub fn plan_renewals(board: &CampaignBoard, cash: f64) -> Vec<Campaign> {
    let mut remaining = cash;
    let mut picks = Vec::new();
    for category in CampaignCategory::ALL {
        if board.active_categories.contains(&category) {
            continue;
        }
        let best = board
            .campaigns
            .iter()
            .filter(|c| c.category == category && c.price <= remaining)
            .max_by(|a, b| a.price.total_cmp(&b.price));
        if let Some(campaign) = best {
            remaining -= campaign.price;
            picks.push(campaign.clone());
        }
    }
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CampaignId;
    use std::collections::HashSet;

    fn campaign(id: u64, category: CampaignCategory, price: f64) -> Campaign {
        Campaign {
            id: CampaignId(id),
            category,
            name: format!("campaign_{id}"),
            price,
        }
    }

    #[test]
    fn picks_most_expensive_affordable_option() {
        // Cash 150, prices [200, 120, 80] in one category → the 120 option.
        let board = CampaignBoard {
            campaigns: vec![
                campaign(1, CampaignCategory::Brand, 200.0),
                campaign(2, CampaignCategory::Brand, 120.0),
                campaign(3, CampaignCategory::Brand, 80.0),
            ],
            active_categories: HashSet::new(),
        };
        let picks = plan_renewals(&board, 150.0);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, CampaignId(2));
    }

    #[test]
    fn active_categories_are_not_renewed() {
        let board = CampaignBoard {
            campaigns: vec![campaign(1, CampaignCategory::Brand, 50.0)],
            active_categories: HashSet::from([CampaignCategory::Brand]),
        };
        assert!(plan_renewals(&board, 1_000.0).is_empty());
    }

    #[test]
    fn running_cash_counter_spans_categories() {
        // 100 cash: Brand takes 80, leaving 20 — Freight's 50 option is no
        // longer affordable, its 15 option is.
        let board = CampaignBoard {
            campaigns: vec![
                campaign(1, CampaignCategory::Brand, 80.0),
                campaign(2, CampaignCategory::Freight, 50.0),
                campaign(3, CampaignCategory::Freight, 15.0),
            ],
            active_categories: HashSet::new(),
        };
        let picks = plan_renewals(&board, 100.0);
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].id, CampaignId(1));
        assert_eq!(picks[1].id, CampaignId(3));
    }

    #[test]
    fn nothing_affordable_is_a_silent_skip() {
        let board = CampaignBoard {
            campaigns: vec![campaign(1, CampaignCategory::Eco, 500.0)],
            active_categories: HashSet::new(),
        };
        assert!(plan_renewals(&board, 100.0).is_empty());
    }
}
