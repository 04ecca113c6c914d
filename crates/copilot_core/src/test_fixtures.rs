//! Shared test fixtures for copilot_core and downstream crates.
//!
//! `container_vessel()` / `tanker_vessel()` build harbor vessels on a
//! Rotterdam→New York route; `port_with_demand()` builds a port snapshot
//! with container demand only. Tests adjust the returned values in place.

use crate::{
    BunkerSnapshot, CargoHold, CargoTotals, PortCode, PortDemand, Route, Vessel, VesselId,
    VesselStatus,
};

pub const ORIGIN: &str = "NLRTM";
pub const DESTINATION: &str = "USNYC";

/// Harbor container vessel at `ORIGIN` routed to `DESTINATION`, not parked,
/// no pending sale. 200 TEU dry by default.
pub fn container_vessel(id: u64, dry: u32) -> Vessel {
    Vessel {
        id: VesselId(id),
        name: format!("MS Test {id}"),
        status: VesselStatus::Port,
        is_parked: false,
        hold: CargoHold::Container {
            dry,
            refrigerated: 0,
        },
        route: Some(Route {
            origin: PortCode(ORIGIN.to_string()),
            destination: PortCode(DESTINATION.to_string()),
            speed: 18,
            guards: false,
        }),
        current_port: PortCode(ORIGIN.to_string()),
        max_speed: 24,
        delivery_price: None,
    }
}

pub fn tanker_vessel(id: u64, fuel: u32) -> Vessel {
    Vessel {
        hold: CargoHold::Tanker { fuel, crude_oil: 0 },
        ..container_vessel(id, 0)
    }
}

/// Port at `DESTINATION` with the given dry-container demand, nothing
/// consumed, no tanker demand.
pub fn port_with_demand(dry_demand: u32) -> PortDemand {
    PortDemand {
        code: PortCode(DESTINATION.to_string()),
        demand: CargoTotals {
            dry: dry_demand,
            ..CargoTotals::default()
        },
        consumed: CargoTotals::default(),
    }
}

/// Bunker snapshot with comfortable fuel reserves and favorable prices.
pub fn base_bunker() -> BunkerSnapshot {
    BunkerSnapshot {
        fuel: 2_000,
        fuel_capacity: 3_000,
        co2: 10_000,
        co2_capacity: 20_000,
        cash: 1_000_000.0,
        fuel_price: 380.0,
        co2_price: 7.0,
    }
}
