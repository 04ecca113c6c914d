//! Type definitions for `copilot_core`.
//!
//! Snapshot types mirroring what the game API reports, plus the ID newtypes
//! used across the workspace. Snapshots are immutable values produced per
//! poll; nothing here is mutated in place.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

macro_rules! numeric_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(PortCode);
numeric_id!(VesselId);
numeric_id!(CampaignId);

// ---------------------------------------------------------------------------
// Consumable resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Fuel,
    Co2,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Fuel, Resource::Co2];

    pub fn label(self) -> &'static str {
        match self {
            Resource::Fuel => "fuel",
            Resource::Co2 => "CO2",
        }
    }
}

/// One poll of the bunker/finance panel. Owned transiently by whichever
/// controller call requested it; never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BunkerSnapshot {
    pub fuel: u64,
    pub fuel_capacity: u64,
    pub co2: u64,
    pub co2_capacity: u64,
    pub cash: f64,
    pub fuel_price: f64,
    pub co2_price: f64,
}

impl BunkerSnapshot {
    pub fn current(&self, resource: Resource) -> u64 {
        match resource {
            Resource::Fuel => self.fuel,
            Resource::Co2 => self.co2,
        }
    }

    pub fn capacity(&self, resource: Resource) -> u64 {
        match resource {
            Resource::Fuel => self.fuel_capacity,
            Resource::Co2 => self.co2_capacity,
        }
    }

    pub fn price(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Fuel => self.fuel_price,
            Resource::Co2 => self.co2_price,
        }
    }
}

// ---------------------------------------------------------------------------
// Vessels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VesselStatus {
    Port,
    Anchor,
    Enroute,
    Pending,
}

impl VesselStatus {
    /// Harbor vessels are available for departure; everything else is not.
    pub fn in_harbor(self) -> bool {
        matches!(self, VesselStatus::Port | VesselStatus::Anchor)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CapacityType {
    Container,
    Tanker,
}

/// Cargo hold of a single vessel, in whole units (TEU or barrels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoHold {
    Container { dry: u32, refrigerated: u32 },
    Tanker { fuel: u32, crude_oil: u32 },
}

impl CargoHold {
    pub fn capacity_type(&self) -> CapacityType {
        match self {
            CargoHold::Container { .. } => CapacityType::Container,
            CargoHold::Tanker { .. } => CapacityType::Tanker,
        }
    }

    pub fn total(&self) -> u32 {
        match *self {
            CargoHold::Container { dry, refrigerated } => dry + refrigerated,
            CargoHold::Tanker { fuel, crude_oil } => fuel + crude_oil,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: PortCode,
    pub destination: PortCode,
    /// Stored route default, whole knots.
    pub speed: u32,
    pub guards: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub status: VesselStatus,
    pub is_parked: bool,
    pub hold: CargoHold,
    pub route: Option<Route>,
    pub current_port: PortCode,
    pub max_speed: u32,
    /// Set while a sale delivery is pending; such vessels never depart.
    pub delivery_price: Option<f64>,
}

impl Vessel {
    /// The route endpoint that is not the vessel's current port.
    pub fn next_destination(&self) -> Option<&PortCode> {
        let route = self.route.as_ref()?;
        if route.destination == self.current_port {
            Some(&route.origin)
        } else {
            Some(&route.destination)
        }
    }
}

// ---------------------------------------------------------------------------
// Port demand
// ---------------------------------------------------------------------------

/// Demand or consumption figures for one port, flattened across the four
/// cargo subtypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoTotals {
    pub dry: u32,
    pub refrigerated: u32,
    pub fuel: u32,
    pub crude_oil: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDemand {
    pub code: PortCode,
    pub demand: CargoTotals,
    pub consumed: CargoTotals,
}

impl PortDemand {
    /// Unmet demand for a capacity type: `Σ max(0, demand − consumed)` over
    /// that type's cargo subtypes.
    pub fn remaining(&self, capacity_type: CapacityType) -> u32 {
        let d = &self.demand;
        let c = &self.consumed;
        match capacity_type {
            CapacityType::Container => {
                d.dry.saturating_sub(c.dry) + d.refrigerated.saturating_sub(c.refrigerated)
            }
            CapacityType::Tanker => {
                d.fuel.saturating_sub(c.fuel) + d.crude_oil.saturating_sub(c.crude_oil)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Marketing campaigns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignCategory {
    Brand,
    Freight,
    Eco,
}

impl CampaignCategory {
    pub const ALL: [CampaignCategory; 3] = [
        CampaignCategory::Brand,
        CampaignCategory::Freight,
        CampaignCategory::Eco,
    ];

    /// Numeric campaign type id as reported by the game.
    pub fn from_type_id(id: u8) -> Option<CampaignCategory> {
        match id {
            1 => Some(CampaignCategory::Brand),
            2 => Some(CampaignCategory::Freight),
            3 => Some(CampaignCategory::Eco),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CampaignCategory::Brand => "brand awareness",
            CampaignCategory::Freight => "freight acquisition",
            CampaignCategory::Eco => "eco image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub category: CampaignCategory,
    pub name: String,
    pub price: f64,
}

/// Result of one campaigns fetch: the catalogue plus which categories
/// currently have an active campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignBoard {
    pub campaigns: Vec<Campaign>,
    pub active_categories: HashSet<CampaignCategory>,
}
