//! Allocation scenario tests spanning the depart planner and port demand
//! arithmetic.

use crate::test_fixtures::{container_vessel, port_with_demand, tanker_vessel, DESTINATION};
use crate::{
    plan_departures, CapacityType, CargoHold, CargoTotals, DepartSettings, DeparturePlan,
    PortCode, PortDemand, SkipReason, VesselStatus,
};

fn settings() -> DepartSettings {
    DepartSettings::default()
}

fn expect_pass(plan: DeparturePlan) -> (Vec<crate::DepartureOrder>, Vec<crate::DepartureSkip>) {
    match plan {
        DeparturePlan::Pass { orders, skips } => (orders, skips),
        DeparturePlan::Paused { reason } => panic!("expected a pass, got paused: {reason}"),
    }
}

#[test]
fn half_full_vessel_departs_at_default_minimum() {
    // Demand 100 TEU, one 200-TEU vessel → 50% utilization ≥ 45% → departs
    // with cargo 100.
    let vessels = vec![container_vessel(1, 200)];
    let ports = vec![port_with_demand(100)];
    let (orders, skips) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    assert_eq!(orders.len(), 1, "vessel should depart");
    assert_eq!(orders[0].cargo, 100);
    assert!((orders[0].utilization - 0.5).abs() < 1e-9);
    assert!(skips.is_empty());
}

#[test]
fn second_vessel_in_group_sees_decremented_demand() {
    // Two 200-TEU vessels, demand 100: the first consumes all of it, the
    // second is skipped with "no demand".
    let vessels = vec![container_vessel(1, 200), container_vessel(2, 200)];
    let ports = vec![port_with_demand(100)];
    let (orders, skips) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].cargo, 100);
    assert_eq!(skips.len(), 1);
    assert!(matches!(skips[0].reason, SkipReason::NoDemand));
}

#[test]
fn largest_vessel_is_considered_first() {
    let vessels = vec![container_vessel(1, 100), container_vessel(2, 400)];
    let ports = vec![port_with_demand(400)];
    let (orders, _) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    assert_eq!(orders[0].vessel_id.0, 2, "largest hull allocates first");
    assert_eq!(orders[0].cargo, 400);
}

#[test]
fn utilization_below_minimum_is_a_skip_not_an_error() {
    // Demand 50 against a 200-TEU hold → 25% < 45%.
    let vessels = vec![container_vessel(1, 200)];
    let ports = vec![port_with_demand(50)];
    let (orders, skips) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    assert!(orders.is_empty());
    assert_eq!(skips.len(), 1);
    assert!(matches!(
        skips[0].reason,
        SkipReason::UtilizationBelowMinimum { .. }
    ));
}

#[test]
fn enroute_capacity_reduces_effective_demand() {
    // Demand 300, but a 250-TEU vessel is already enroute → effective 50,
    // and 50/200 = 25% keeps the harbor vessel in port.
    let mut inbound = container_vessel(9, 250);
    inbound.status = VesselStatus::Enroute;
    let vessels = vec![container_vessel(1, 200), inbound];
    let ports = vec![port_with_demand(300)];
    let (orders, skips) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    assert!(orders.is_empty());
    assert_eq!(skips.len(), 1);
}

#[test]
fn allocation_never_exceeds_net_demand() {
    // Σ cargo departed to a destination/type never exceeds
    // remaining − enroute computed at pass start.
    let mut inbound = container_vessel(9, 120);
    inbound.status = VesselStatus::Enroute;
    let vessels = vec![
        container_vessel(1, 300),
        container_vessel(2, 250),
        container_vessel(3, 200),
        inbound,
    ];
    let ports = vec![port_with_demand(600)];
    let (orders, _) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    let total: u32 = orders.iter().map(|o| o.cargo).sum();
    assert!(total <= 600 - 120, "allocated {total} against net 480");
}

#[test]
fn each_vessel_appears_at_most_once_per_pass() {
    let vessels = vec![container_vessel(1, 200), container_vessel(2, 200)];
    let ports = vec![port_with_demand(1_000)];
    let (orders, _) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    let mut ids: Vec<u64> = orders.iter().map(|o| o.vessel_id.0).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), orders.len(), "a vessel departed twice in one pass");
}

#[test]
fn fuel_below_floor_pauses_the_pass() {
    let vessels = vec![container_vessel(1, 200)];
    let ports = vec![port_with_demand(100)];
    match plan_departures(&vessels, &ports, 9, &settings()) {
        DeparturePlan::Paused { reason } => {
            assert!(reason.contains("fuel"), "reason should name fuel: {reason}");
        }
        DeparturePlan::Pass { .. } => panic!("expected paused plan below fuel floor"),
    }
}

#[test]
fn fuel_at_floor_resumes() {
    let vessels = vec![container_vessel(1, 200)];
    let ports = vec![port_with_demand(100)];
    let (orders, _) = expect_pass(plan_departures(&vessels, &ports, 10, &settings()));
    assert_eq!(orders.len(), 1);
}

#[test]
fn parked_pending_and_enroute_vessels_are_ineligible() {
    let mut parked = container_vessel(1, 200);
    parked.is_parked = true;
    let mut pending = container_vessel(2, 200);
    pending.delivery_price = Some(1_500_000.0);
    let mut enroute = container_vessel(3, 200);
    enroute.status = VesselStatus::Enroute;
    let mut unrouted = container_vessel(4, 200);
    unrouted.route = None;

    let ports = vec![port_with_demand(1_000)];
    let (orders, skips) = expect_pass(plan_departures(
        &[parked, pending, enroute, unrouted],
        &ports,
        2_000,
        &settings(),
    ));
    assert!(orders.is_empty());
    assert!(skips.is_empty(), "ineligible vessels are not reported skips");
}

#[test]
fn container_and_tanker_demand_are_separate_pools() {
    let vessels = vec![container_vessel(1, 200), tanker_vessel(2, 200)];
    let ports = vec![PortDemand {
        code: PortCode(DESTINATION.to_string()),
        demand: CargoTotals {
            dry: 200,
            fuel: 200,
            ..CargoTotals::default()
        },
        consumed: CargoTotals::default(),
    }];
    let (orders, _) = expect_pass(plan_departures(&vessels, &ports, 2_000, &settings()));

    assert_eq!(orders.len(), 2, "both pools allocate independently");
    assert!(orders.iter().all(|o| o.cargo == 200));
}

#[test]
fn return_leg_targets_the_route_origin() {
    // Vessel sitting at the route's destination goes back to the origin.
    let mut vessel = container_vessel(1, 200);
    vessel.current_port = PortCode(DESTINATION.to_string());
    let ports = vec![PortDemand {
        code: PortCode(crate::test_fixtures::ORIGIN.to_string()),
        demand: CargoTotals {
            dry: 150,
            ..CargoTotals::default()
        },
        consumed: CargoTotals::default(),
    }];
    let (orders, _) = expect_pass(plan_departures(&[vessel], &ports, 2_000, &settings()));

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].destination.0, crate::test_fixtures::ORIGIN);
}

#[test]
fn route_defaults_carry_speed_and_guards() {
    let mut vessel = container_vessel(1, 200);
    vessel.route.as_mut().unwrap().speed = 15;
    vessel.route.as_mut().unwrap().guards = true;
    let ports = vec![port_with_demand(200)];
    let (orders, _) = expect_pass(plan_departures(&[vessel], &ports, 2_000, &settings()));

    assert_eq!(orders[0].speed, 15);
    assert!(orders[0].guards);
}

#[test]
fn derived_speed_is_a_percentage_of_max() {
    let mut vessel = container_vessel(1, 200);
    vessel.max_speed = 24;
    vessel.route.as_mut().unwrap().guards = true;
    let ports = vec![port_with_demand(200)];
    let settings = DepartSettings {
        use_route_defaults: false,
        speed_pct: 50,
        min_utilization_pct: 45,
    };
    let (orders, _) = expect_pass(plan_departures(&[vessel], &ports, 2_000, &settings));

    assert_eq!(orders[0].speed, 12);
    assert!(orders[0].guards, "guards always inherit from the route");
}

#[test]
fn demand_remaining_saturates_per_subtype() {
    // Over-consumption in one subtype must not bleed into another.
    let port = PortDemand {
        code: PortCode(DESTINATION.to_string()),
        demand: CargoTotals {
            dry: 100,
            refrigerated: 50,
            ..CargoTotals::default()
        },
        consumed: CargoTotals {
            dry: 180,
            refrigerated: 10,
            ..CargoTotals::default()
        },
    };
    assert_eq!(port.remaining(CapacityType::Container), 40);
    assert_eq!(port.remaining(CapacityType::Tanker), 0);
}

#[test]
fn hold_totals_sum_subtypes() {
    let hold = CargoHold::Container {
        dry: 120,
        refrigerated: 30,
    };
    assert_eq!(hold.total(), 150);
    assert_eq!(hold.capacity_type(), CapacityType::Container);
}
