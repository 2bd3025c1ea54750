use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::AssetStatus;

pub struct MarkLostCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl MarkLostCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkLostCommandRequest {
    asset_id: String,
}

impl MarkLostCommandRequest {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkLostCommandResponse {
    pub asset_id: String,
    pub status: AssetStatus,
}

impl MarkLostCommandResponse {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            status: AssetStatus::Lost,
        }
    }
}

#[async_trait]
impl Command<MarkLostCommandRequest, MarkLostCommandResponse> for MarkLostCommand {
    async fn execute(&self, req: MarkLostCommandRequest) -> Result<MarkLostCommandResponse, CommandError> {
        self.circulation_service.mark_lost(req.asset_id.as_str())
            .await.map_err(CommandError::from).map(|_| MarkLostCommandResponse::new(req.asset_id.as_str()))
    }
}
