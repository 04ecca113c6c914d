//! Purchase planning for a single consumable resource.

/// Decide how many units to buy at the current price.
///
/// Buys the lesser of remaining bunker headroom and the cash-affordable
/// quantity, and only when `price <= threshold`. Returns `None` when the
/// price is unfavorable or the resulting amount would be zero. Rounding is
/// always toward fewer units, so the plan never exceeds headroom or cash.
pub fn plan_purchase(
    price: f64,
    threshold: f64,
    current: u64,
    capacity: u64,
    cash: f64,
) -> Option<u64> {
    if price <= 0.0 || price > threshold {
        return None;
    }
    let headroom = capacity.saturating_sub(current);
    let affordable = (cash / price).max(0.0).floor() as u64;
    let amount = headroom.min(affordable);
    if amount == 0 {
        return None;
    }
    Some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorable_price_fills_headroom_with_unlimited_cash() {
        // Scenario: price 380, threshold 400, headroom 1000t, effectively
        // unlimited cash — buy exactly 1000t.
        let amount = plan_purchase(380.0, 400.0, 2_000, 3_000, 1e12);
        assert_eq!(amount, Some(1_000));
    }

    #[test]
    fn price_above_threshold_is_a_no_op() {
        assert_eq!(plan_purchase(401.0, 400.0, 0, 3_000, 1e12), None);
    }

    #[test]
    fn cash_bound_rounds_down() {
        // 1000 cash at 380/t affords 2.63t → 2t.
        assert_eq!(plan_purchase(380.0, 400.0, 0, 3_000, 1_000.0), Some(2));
    }

    #[test]
    fn full_bunker_is_a_no_op() {
        assert_eq!(plan_purchase(380.0, 400.0, 3_000, 3_000, 1e12), None);
    }

    #[test]
    fn negative_cash_is_a_no_op() {
        assert_eq!(plan_purchase(380.0, 400.0, 0, 3_000, -50.0), None);
    }

    #[test]
    fn zero_price_is_a_no_op() {
        assert_eq!(plan_purchase(0.0, 400.0, 0, 3_000, 1e12), None);
    }

    #[test]
    fn never_exceeds_headroom_or_cash() {
        for (current, capacity, cash) in [
            (0u64, 500u64, 100.0f64),
            (100, 500, 10_000.0),
            (499, 500, 1e9),
            (0, 0, 1e9),
        ] {
            if let Some(amount) = plan_purchase(250.0, 300.0, current, capacity, cash) {
                assert!(amount <= capacity - current, "amount exceeds headroom");
                assert!(amount <= (cash / 250.0).floor() as u64, "amount exceeds cash");
            }
        }
    }
}
