use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::hold::dto::HoldDto;

pub struct PlaceHoldCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl PlaceHoldCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceHoldCommandRequest {
    asset_id: String,
    card_id: String,
}

impl PlaceHoldCommandRequest {
    pub fn new(asset_id: &str, card_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            card_id: card_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaceHoldCommandResponse {
    pub hold: HoldDto,
}

impl PlaceHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<PlaceHoldCommandRequest, PlaceHoldCommandResponse> for PlaceHoldCommand {
    async fn execute(&self, req: PlaceHoldCommandRequest) -> Result<PlaceHoldCommandResponse, CommandError> {
        self.circulation_service.place_hold(req.asset_id.as_str(), req.card_id.as_str())
            .await.map_err(CommandError::from).map(PlaceHoldCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::circulation::command::fixtures::CommandFixture;
    use crate::circulation::command::place_hold_cmd::{PlaceHoldCommand, PlaceHoldCommandRequest};
    use crate::core::command::{Command, CommandError};
    use crate::core::library::AssetStatus;

    lazy_static! {
        static ref FIXTURE : AsyncOnce<CommandFixture> = AsyncOnce::new(async {
                CommandFixture::new()
            });
    }

    #[tokio::test]
    async fn test_should_run_place_hold() {
        let fixture = FIXTURE.get().await;
        let cmd = PlaceHoldCommand::new(fixture.svc.clone());
        let asset_id = fixture.add_asset().await;
        let card_id = fixture.add_card().await;

        let res = cmd.execute(PlaceHoldCommandRequest::new(asset_id.as_str(), card_id.as_str()))
            .await.expect("should place hold");
        assert_eq!(card_id, res.hold.card_id);
        assert_eq!(AssetStatus::OnHold, fixture.svc.get_asset_status(asset_id.as_str()).await.expect("should get status"));
        assert_eq!(vec![res.hold], fixture.svc.get_current_holds(asset_id.as_str()).await.expect("should get holds"));
    }

    #[tokio::test]
    async fn test_should_fail_place_hold_on_unknown_asset() {
        let fixture = FIXTURE.get().await;
        let cmd = PlaceHoldCommand::new(fixture.svc.clone());
        let card_id = fixture.add_card().await;

        let res = cmd.execute(PlaceHoldCommandRequest::new("unknown", card_id.as_str())).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
