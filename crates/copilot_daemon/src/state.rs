use std::sync::Arc;

use copilot_engine::AutoPilot;

#[derive(Clone)]
pub struct AppState {
    pub pilot: Arc<AutoPilot>,
}
