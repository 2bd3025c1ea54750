use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::{CheckoutOutcome, CirculationService};
use crate::core::command::{Command, CommandError};

pub struct CheckOutItemCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl CheckOutItemCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckOutItemCommandRequest {
    asset_id: String,
    card_id: String,
}

impl CheckOutItemCommandRequest {
    pub fn new(asset_id: &str, card_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            card_id: card_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOutItemCommandResponse {
    pub outcome: CheckoutOutcome,
}

impl CheckOutItemCommandResponse {
    pub fn new(outcome: CheckoutOutcome) -> Self {
        Self {
            outcome,
        }
    }
}

#[async_trait]
impl Command<CheckOutItemCommandRequest, CheckOutItemCommandResponse> for CheckOutItemCommand {
    async fn execute(&self, req: CheckOutItemCommandRequest) -> Result<CheckOutItemCommandResponse, CommandError> {
        self.circulation_service.check_out_item(req.asset_id.as_str(), req.card_id.as_str())
            .await.map_err(CommandError::from).map(CheckOutItemCommandResponse::new)
    }
}
