use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::{CheckinOutcome, CirculationService};
use crate::core::command::{Command, CommandError};

pub struct CheckInItemCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl CheckInItemCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckInItemCommandRequest {
    asset_id: String,
}

impl CheckInItemCommandRequest {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckInItemCommandResponse {
    pub outcome: CheckinOutcome,
}

impl CheckInItemCommandResponse {
    pub fn new(outcome: CheckinOutcome) -> Self {
        Self {
            outcome,
        }
    }
}

#[async_trait]
impl Command<CheckInItemCommandRequest, CheckInItemCommandResponse> for CheckInItemCommand {
    async fn execute(&self, req: CheckInItemCommandRequest) -> Result<CheckInItemCommandResponse, CommandError> {
        self.circulation_service.check_in_item(req.asset_id.as_str())
            .await.map_err(CommandError::from).map(CheckInItemCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::circulation::command::check_in_item_cmd::{CheckInItemCommand, CheckInItemCommandRequest};
    use crate::circulation::command::check_out_item_cmd::{CheckOutItemCommand, CheckOutItemCommandRequest};
    use crate::circulation::command::fixtures::CommandFixture;
    use crate::circulation::command::place_hold_cmd::{PlaceHoldCommand, PlaceHoldCommandRequest};
    use crate::circulation::domain::CheckinOutcome;
    use crate::core::command::Command;

    lazy_static! {
        static ref FIXTURE : AsyncOnce<CommandFixture> = AsyncOnce::new(async {
                CommandFixture::new()
            });
    }

    #[tokio::test]
    async fn test_should_run_check_in_item() {
        let fixture = FIXTURE.get().await;
        let check_out_cmd = CheckOutItemCommand::new(fixture.svc.clone());
        let check_in_cmd = CheckInItemCommand::new(fixture.svc.clone());
        let asset_id = fixture.add_asset().await;
        let card_id = fixture.add_card().await;

        let _ = check_out_cmd.execute(CheckOutItemCommandRequest::new(asset_id.as_str(), card_id.as_str()))
            .await.expect("should check out item");
        let res = check_in_cmd.execute(CheckInItemCommandRequest::new(asset_id.as_str()))
            .await.expect("should check in item");
        assert_eq!(CheckinOutcome::Available, res.outcome);
    }

    #[tokio::test]
    async fn test_should_run_check_in_item_to_hold() {
        let fixture = FIXTURE.get().await;
        let check_out_cmd = CheckOutItemCommand::new(fixture.svc.clone());
        let hold_cmd = PlaceHoldCommand::new(fixture.svc.clone());
        let check_in_cmd = CheckInItemCommand::new(fixture.svc.clone());
        let asset_id = fixture.add_asset().await;
        let borrower = fixture.add_card().await;
        let waiting = fixture.add_card().await;

        let _ = check_out_cmd.execute(CheckOutItemCommandRequest::new(asset_id.as_str(), borrower.as_str()))
            .await.expect("should check out item");
        let _ = hold_cmd.execute(PlaceHoldCommandRequest::new(asset_id.as_str(), waiting.as_str()))
            .await.expect("should place hold");
        let res = check_in_cmd.execute(CheckInItemCommandRequest::new(asset_id.as_str()))
            .await.expect("should check in item");
        match res.outcome {
            CheckinOutcome::TransferredToHold { hold, checkout } => {
                assert_eq!(waiting, hold.card_id);
                assert_eq!(waiting, checkout.card_id);
            }
            CheckinOutcome::Available => panic!("expected transfer to the hold"),
        }
    }
}
