//! Wire DTOs for the game API and their conversions into core snapshot
//! types. Lenient where the server is sloppy: unknown vessel statuses or
//! campaign types are dropped, not errors.

use copilot_core::{
    BunkerSnapshot, Campaign, CampaignBoard, CampaignCategory, CampaignId, CargoHold,
    CargoTotals, PortCode, PortDemand, Route, Vessel, VesselId, VesselStatus,
};
use serde::Deserialize;

use crate::GatewayError;

// ---------------------------------------------------------------------------
// Bunker
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct WireBunker {
    pub fuel: u64,
    pub fuel_max: u64,
    pub co2: u64,
    pub co2_max: u64,
    pub cash: f64,
    pub fuel_price: f64,
    pub co2_price: f64,
}

impl From<WireBunker> for BunkerSnapshot {
    fn from(w: WireBunker) -> Self {
        BunkerSnapshot {
            fuel: w.fuel,
            fuel_capacity: w.fuel_max,
            co2: w.co2,
            co2_capacity: w.co2_max,
            cash: w.cash,
            fuel_price: w.fuel_price,
            co2_price: w.co2_price,
        }
    }
}

// ---------------------------------------------------------------------------
// Vessels
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireCapacity {
    #[serde(default)]
    pub dry: u32,
    #[serde(default)]
    pub refrigerated: u32,
    #[serde(default)]
    pub fuel: u32,
    #[serde(default)]
    pub crude_oil: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireVessel {
    pub id: u64,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub is_parked: bool,
    pub capacity_type: String,
    #[serde(default)]
    pub capacity: WireCapacity,
    pub route_origin: Option<String>,
    pub route_destination: Option<String>,
    pub current_port_code: String,
    #[serde(default)]
    pub route_speed: u32,
    #[serde(default)]
    pub route_guards: bool,
    pub max_speed: u32,
    pub delivery_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireVessels {
    pub vessels: Vec<WireVessel>,
}

fn parse_status(raw: &str) -> Option<VesselStatus> {
    match raw {
        "port" => Some(VesselStatus::Port),
        "anchor" => Some(VesselStatus::Anchor),
        "enroute" => Some(VesselStatus::Enroute),
        "pending" => Some(VesselStatus::Pending),
        _ => None,
    }
}

impl WireVessel {
    /// `None` when the record can't be mapped onto a known status or
    /// capacity type; the caller drops it with a warning.
    pub fn into_vessel(self) -> Option<Vessel> {
        let status = parse_status(&self.status)?;
        let hold = match self.capacity_type.as_str() {
            "container" => CargoHold::Container {
                dry: self.capacity.dry,
                refrigerated: self.capacity.refrigerated,
            },
            "tanker" => CargoHold::Tanker {
                fuel: self.capacity.fuel,
                crude_oil: self.capacity.crude_oil,
            },
            _ => return None,
        };
        let route = match (self.route_origin, self.route_destination) {
            (Some(origin), Some(destination)) => Some(Route {
                origin: PortCode(origin),
                destination: PortCode(destination),
                speed: self.route_speed,
                guards: self.route_guards,
            }),
            _ => None,
        };
        Some(Vessel {
            id: VesselId(self.id),
            name: self.name,
            status,
            is_parked: self.is_parked,
            hold,
            route,
            current_port: PortCode(self.current_port_code),
            max_speed: self.max_speed,
            delivery_price: self.delivery_price,
        })
    }
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireContainerDemand {
    #[serde(default)]
    pub dry: u32,
    #[serde(default)]
    pub refrigerated: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireTankerDemand {
    #[serde(default)]
    pub fuel: u32,
    #[serde(default)]
    pub crude_oil: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireCargoMatrix {
    #[serde(default)]
    pub container: WireContainerDemand,
    #[serde(default)]
    pub tanker: WireTankerDemand,
}

impl From<WireCargoMatrix> for CargoTotals {
    fn from(m: WireCargoMatrix) -> Self {
        CargoTotals {
            dry: m.container.dry,
            refrigerated: m.container.refrigerated,
            fuel: m.tanker.fuel,
            crude_oil: m.tanker.crude_oil,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePort {
    pub code: String,
    #[serde(default)]
    pub demand: WireCargoMatrix,
    #[serde(default)]
    pub consumed: WireCargoMatrix,
}

impl From<WirePort> for PortDemand {
    fn from(w: WirePort) -> Self {
        PortDemand {
            code: PortCode(w.code),
            demand: w.demand.into(),
            consumed: w.consumed.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct WireCampaign {
    pub id: u64,
    pub name: String,
    pub campaign_type: u8,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireActiveCampaign {
    pub campaign_type: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCampaigns {
    pub marketing_campaigns: Vec<WireCampaign>,
    pub active_campaigns: Vec<WireActiveCampaign>,
}

impl From<WireCampaigns> for CampaignBoard {
    fn from(w: WireCampaigns) -> Self {
        let campaigns = w
            .marketing_campaigns
            .into_iter()
            .filter_map(|c| {
                Some(Campaign {
                    id: CampaignId(c.id),
                    category: CampaignCategory::from_type_id(c.campaign_type)?,
                    name: c.name,
                    price: c.price,
                })
            })
            .collect();
        let active_categories = w
            .active_campaigns
            .iter()
            .filter_map(|a| CampaignCategory::from_type_id(a.campaign_type))
            .collect();
        CampaignBoard {
            campaigns,
            active_categories,
        }
    }
}

// ---------------------------------------------------------------------------
// Action results
// ---------------------------------------------------------------------------

/// Generic action acknowledgement. The server reports domain rejections as
/// an `error` string on an otherwise successful response.
#[derive(Debug, Deserialize)]
pub(crate) struct ActionAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ActionAck {
    pub fn into_result(self) -> Result<(), GatewayError> {
        if let Some(message) = self.error {
            return Err(GatewayError::Api(message));
        }
        if self.success == Some(false) {
            return Err(GatewayError::Api("request failed".to_string()));
        }
        Ok(())
    }
}

/// Financial outcome of a departure call. All-zero figures mean the server
/// no-opped the request (insufficient fuel/CO2 at call time) even though the
/// call itself succeeded at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DepartOutcome {
    #[serde(default)]
    pub depart_income: f64,
    #[serde(default)]
    pub harbor_fee: f64,
    #[serde(default)]
    pub fuel_usage: f64,
    #[serde(default)]
    pub co2_emission: f64,
}

impl DepartOutcome {
    pub fn is_noop(&self) -> bool {
        self.depart_income.abs() < f64::EPSILON
            && self.fuel_usage.abs() < f64::EPSILON
            && self.co2_emission.abs() < f64::EPSILON
    }
}
