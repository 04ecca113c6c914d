//! Departure allocation.
//!
//! Decides which harbor vessels depart this cycle and with what sail
//! parameters, bounded by destination demand net of capacity already
//! enroute. Greedy and threshold-based — not a global optimizer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{CapacityType, PortCode, PortDemand, Vessel, VesselId};

/// Below this fuel reserve no departures are attempted at all.
pub const FUEL_FLOOR_TONNES: u64 = 10;

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartSettings {
    /// Inherit speed from the route's stored default instead of deriving it.
    pub use_route_defaults: bool,
    /// Derived speed as a percentage of the vessel's maximum, 0–100.
    pub speed_pct: u32,
    /// Minimum hold utilization required to depart, 0–100.
    pub min_utilization_pct: u32,
}

impl Default for DepartSettings {
    fn default() -> Self {
        Self {
            use_route_defaults: true,
            speed_pct: 100,
            min_utilization_pct: 45,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureOrder {
    pub vessel_id: VesselId,
    pub vessel_name: String,
    pub destination: PortCode,
    pub cargo: u32,
    pub utilization: f64,
    pub speed: u32,
    pub guards: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    NoDemand,
    UtilizationBelowMinimum { utilization: f64 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoDemand => f.write_str("no demand"),
            SkipReason::UtilizationBelowMinimum { utilization } => {
                write!(f, "utilization {:.0}% below minimum", utilization * 100.0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureSkip {
    pub vessel_id: VesselId,
    pub vessel_name: String,
    pub reason: SkipReason,
}

/// Outcome of one allocation pass over a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeparturePlan {
    /// Fuel reserve below the floor — no departures this cycle.
    Paused { reason: String },
    Pass {
        orders: Vec<DepartureOrder>,
        skips: Vec<DepartureSkip>,
    },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Eligible means: in harbor, not parked, routed, and not a pending sale.
fn is_eligible(vessel: &Vessel) -> bool {
    vessel.status.in_harbor()
        && !vessel.is_parked
        && vessel.route.is_some()
        && vessel.delivery_price.is_none()
}

/// Sums hold capacity of vessels already enroute, per (destination, type).
fn capacity_enroute(vessels: &[Vessel]) -> HashMap<(PortCode, CapacityType), u32> {
    let mut enroute: HashMap<(PortCode, CapacityType), u32> = HashMap::new();
    for vessel in vessels {
        if vessel.status != crate::VesselStatus::Enroute {
            continue;
        }
        let Some(destination) = vessel.next_destination() else {
            continue;
        };
        *enroute
            .entry((destination.clone(), vessel.hold.capacity_type()))
            .or_default() += vessel.hold.total();
    }
    enroute
}

/// Groups eligible vessels by (next destination, capacity type), each group
/// sorted by total capacity descending so the largest hulls are considered
/// first. Ties keep input order.
fn eligible_groups(vessels: &[Vessel]) -> HashMap<(PortCode, CapacityType), Vec<&Vessel>> {
    let mut groups: HashMap<(PortCode, CapacityType), Vec<&Vessel>> = HashMap::new();
    for vessel in vessels.iter().filter(|v| is_eligible(v)) {
        let Some(destination) = vessel.next_destination() else {
            continue;
        };
        groups
            .entry((destination.clone(), vessel.hold.capacity_type()))
            .or_default()
            .push(vessel);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| b.hold.total().cmp(&a.hold.total()));
    }
    groups
}

/// Sail speed for a departing vessel. Guards always come from the route.
fn sail_speed(vessel: &Vessel, settings: &DepartSettings) -> u32 {
    let route = vessel.route.as_ref();
    if settings.use_route_defaults {
        route.map_or(vessel.max_speed, |r| r.speed)
    } else {
        (vessel.max_speed * settings.speed_pct.min(100) / 100).max(1)
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Allocate departures for the current snapshot.
///
/// Within each (destination, type) group the demand ledger is decremented
/// strictly sequentially; parallelizing would double-allocate the same
/// demand to multiple vessels.
pub fn plan_departures(
    vessels: &[Vessel],
    ports: &[PortDemand],
    fuel_available: u64,
    settings: &DepartSettings,
) -> DeparturePlan {
    if fuel_available < FUEL_FLOOR_TONNES {
        return DeparturePlan::Paused {
            reason: format!(
                "fuel reserve {fuel_available}t below {FUEL_FLOOR_TONNES}t floor"
            ),
        };
    }

    let demand_by_code: HashMap<&PortCode, &PortDemand> =
        ports.iter().map(|p| (&p.code, p)).collect();
    let enroute = capacity_enroute(vessels);
    let min_utilization = f64::from(settings.min_utilization_pct) / 100.0;

    let mut orders = Vec::new();
    let mut skips = Vec::new();

    let mut groups: Vec<_> = eligible_groups(vessels).into_iter().collect();
    // Group iteration order does not affect allocation (groups are disjoint),
    // but sort for deterministic reporting.
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    for ((destination, capacity_type), group) in groups {
        let remaining = demand_by_code
            .get(&destination)
            .map_or(0, |p| p.remaining(capacity_type));
        let inbound = enroute
            .get(&(destination.clone(), capacity_type))
            .copied()
            .unwrap_or(0);
        let mut effective_demand = remaining.saturating_sub(inbound);

        for vessel in group {
            if effective_demand == 0 {
                skips.push(DepartureSkip {
                    vessel_id: vessel.id,
                    vessel_name: vessel.name.clone(),
                    reason: SkipReason::NoDemand,
                });
                continue;
            }
            let capacity = vessel.hold.total();
            let cargo = effective_demand.min(capacity);
            let utilization = f64::from(cargo) / f64::from(capacity.max(1));
            if utilization < min_utilization {
                skips.push(DepartureSkip {
                    vessel_id: vessel.id,
                    vessel_name: vessel.name.clone(),
                    reason: SkipReason::UtilizationBelowMinimum { utilization },
                });
                continue;
            }
            effective_demand -= cargo;
            orders.push(DepartureOrder {
                vessel_id: vessel.id,
                vessel_name: vessel.name.clone(),
                destination: destination.clone(),
                cargo,
                utilization,
                speed: sail_speed(vessel, settings),
                guards: vessel.route.as_ref().is_some_and(|r| r.guards),
            });
        }
    }

    DeparturePlan::Pass { orders, skips }
}
