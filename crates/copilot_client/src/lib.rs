//! `copilot_client` — the Action Gateway.
//!
//! The remote game API is the ground truth for prices, vessel and port
//! state, and all financial effects. Everything here is a thin JSON client;
//! no decision logic.

mod error;
mod http;
mod wire;

pub use error::GatewayError;
pub use http::HttpGateway;
pub use wire::DepartOutcome;

use async_trait::async_trait;
use copilot_core::{
    BunkerSnapshot, CampaignBoard, CampaignId, PortDemand, Resource, Vessel, VesselId,
};

/// The remote endpoints the engine acts through. Each call is a single
/// request with a JSON result and no queuing guarantee; the server may
/// silently no-op a request (see [`DepartOutcome::is_noop`]).
#[async_trait]
pub trait ActionGateway: Send + Sync {
    async fn fetch_bunker(&self) -> Result<BunkerSnapshot, GatewayError>;
    async fn fetch_vessels(&self) -> Result<Vec<Vessel>, GatewayError>;
    async fn fetch_assigned_ports(&self) -> Result<Vec<PortDemand>, GatewayError>;
    async fn fetch_campaigns(&self) -> Result<CampaignBoard, GatewayError>;

    /// Buy `amount` whole units of a consumable at the current price.
    async fn purchase(&self, resource: Resource, amount: u64) -> Result<(), GatewayError>;

    /// Send a vessel out. A transport-level success may still be a domain
    /// no-op — the caller must check the outcome.
    async fn depart(
        &self,
        vessel: VesselId,
        speed: u32,
        guards: bool,
    ) -> Result<DepartOutcome, GatewayError>;

    async fn activate_campaign(&self, campaign: CampaignId) -> Result<(), GatewayError>;
}
