use thiserror::Error;

/// Failure taxonomy for gateway calls.
///
/// `Api` covers requests the server accepted but rejected in-domain
/// (e.g. `not_enough_cash`); controllers report those as skips, not faults.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api rejected request: {0}")]
    Api(String),

    #[error("decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// True for in-domain rejections, false for transport/decode faults.
    pub fn is_rejection(&self) -> bool {
        matches!(self, GatewayError::Api(_))
    }
}
