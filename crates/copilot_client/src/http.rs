//! HTTP implementation of the gateway against the game's JSON API.

use async_trait::async_trait;
use copilot_core::{
    BunkerSnapshot, CampaignBoard, CampaignId, PortDemand, Resource, Vessel, VesselId,
};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde::de::DeserializeOwned;

use crate::wire::{ActionAck, WireBunker, WireCampaigns, WirePort, WireVessels};
use crate::{ActionGateway, DepartOutcome, GatewayError};

pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway authenticated with the player's session cookie.
    pub fn new(base_url: &str, session_cookie: &str) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        let cookie = HeaderValue::from_str(session_cookie)
            .map_err(|e| GatewayError::Api(format!("invalid session cookie: {e}")))?;
        headers.insert(COOKIE, cookie);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        tracing::debug!(path, "gateway GET");
        let body = self
            .client
            .get(self.url(path))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, GatewayError> {
        tracing::debug!(path, "gateway POST");
        let text = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ActionGateway for HttpGateway {
    async fn fetch_bunker(&self) -> Result<BunkerSnapshot, GatewayError> {
        let wire: WireBunker = self.get_json("/api/bunker").await?;
        Ok(wire.into())
    }

    async fn fetch_vessels(&self) -> Result<Vec<Vessel>, GatewayError> {
        let wire: WireVessels = self.get_json("/api/vessels").await?;
        let total = wire.vessels.len();
        let vessels: Vec<Vessel> = wire
            .vessels
            .into_iter()
            .filter_map(crate::wire::WireVessel::into_vessel)
            .collect();
        if vessels.len() < total {
            tracing::warn!(
                dropped = total - vessels.len(),
                "dropped vessels with unknown status or capacity type"
            );
        }
        Ok(vessels)
    }

    async fn fetch_assigned_ports(&self) -> Result<Vec<PortDemand>, GatewayError> {
        let wire: Vec<WirePort> = self.get_json("/api/ports/assigned").await?;
        Ok(wire.into_iter().map(Into::into).collect())
    }

    async fn fetch_campaigns(&self) -> Result<CampaignBoard, GatewayError> {
        let wire: WireCampaigns = self.get_json("/api/campaigns").await?;
        Ok(wire.into())
    }

    async fn purchase(&self, resource: Resource, amount: u64) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "resource": resource, "amount": amount });
        let ack: ActionAck = self.post_json("/api/bunker/purchase", &body).await?;
        ack.into_result()
    }

    async fn depart(
        &self,
        vessel: VesselId,
        speed: u32,
        guards: bool,
    ) -> Result<DepartOutcome, GatewayError> {
        let body = serde_json::json!({
            "vessel_id": vessel.0,
            "speed": speed,
            "guards": guards,
        });
        self.post_json("/api/vessel/depart", &body).await
    }

    async fn activate_campaign(&self, campaign: CampaignId) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "campaign_id": campaign.0 });
        let ack: ActionAck = self.post_json("/api/campaign/activate", &body).await?;
        ack.into_result()
    }
}
