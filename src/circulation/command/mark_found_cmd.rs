use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::AssetStatus;

pub struct MarkFoundCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl MarkFoundCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkFoundCommandRequest {
    asset_id: String,
}

impl MarkFoundCommandRequest {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkFoundCommandResponse {
    pub asset_id: String,
    pub status: AssetStatus,
}

impl MarkFoundCommandResponse {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            status: AssetStatus::Available,
        }
    }
}

#[async_trait]
impl Command<MarkFoundCommandRequest, MarkFoundCommandResponse> for MarkFoundCommand {
    async fn execute(&self, req: MarkFoundCommandRequest) -> Result<MarkFoundCommandResponse, CommandError> {
        self.circulation_service.mark_found(req.asset_id.as_str())
            .await.map_err(CommandError::from).map(|_| MarkFoundCommandResponse::new(req.asset_id.as_str()))
    }
}
