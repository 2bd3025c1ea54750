pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::checkout::dto::{CheckoutDto, CheckoutHistoryDto};
use crate::core::library::{AssetStatus, LibraryResult, PaginatedResult};
use crate::hold::dto::HoldDto;

/// Result of asking to check an asset out.
///
/// An asset that is already checked out is not an error: the request is ignored and
/// the caller decides whether to tell the patron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    CheckedOut { checkout: CheckoutDto },
    AlreadyCheckedOut,
}

/// Result of checking an asset in.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckinOutcome {
    // nobody was waiting, the asset is back on the shelf
    Available,
    // the earliest hold was consumed and the asset went straight to its card
    TransferredToHold { hold: HoldDto, checkout: CheckoutDto },
}

#[async_trait]
pub trait CirculationService: Sync + Send {
    async fn check_out_item(&self, asset_id: &str, card_id: &str) -> LibraryResult<CheckoutOutcome>;
    async fn check_in_item(&self, asset_id: &str) -> LibraryResult<CheckinOutcome>;
    async fn place_hold(&self, asset_id: &str, card_id: &str) -> LibraryResult<HoldDto>;
    async fn mark_lost(&self, asset_id: &str) -> LibraryResult<()>;
    async fn mark_found(&self, asset_id: &str) -> LibraryResult<()>;

    async fn get_asset_status(&self, asset_id: &str) -> LibraryResult<AssetStatus>;
    async fn is_checked_out(&self, asset_id: &str) -> LibraryResult<bool>;
    async fn get_latest_checkout(&self, asset_id: &str) -> LibraryResult<Option<CheckoutDto>>;
    async fn get_checkout_by_id(&self, checkout_id: &str) -> LibraryResult<CheckoutDto>;
    async fn get_all_checkouts(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>>;
    async fn get_checkout_history(&self, asset_id: &str) -> LibraryResult<Vec<CheckoutHistoryDto>>;
    async fn get_current_holds(&self, asset_id: &str) -> LibraryResult<Vec<HoldDto>>;
    async fn get_checkouts_for_card(&self, card_id: &str) -> LibraryResult<Vec<CheckoutDto>>;
    async fn get_holds_for_card(&self, card_id: &str) -> LibraryResult<Vec<HoldDto>>;
    async fn get_history_for_card(&self, card_id: &str) -> LibraryResult<Vec<CheckoutHistoryDto>>;
    async fn query_overdue(&self) -> LibraryResult<Vec<CheckoutDto>>;

    // display name of the patron holding the asset, empty when it is not checked out
    async fn get_current_checkout_patron(&self, asset_id: &str) -> LibraryResult<String>;
    // display name of the patron who placed the hold, empty when the hold is gone
    async fn get_current_hold_patron_name(&self, hold_id: &str) -> LibraryResult<String>;
    async fn get_current_hold_placed(&self, hold_id: &str) -> LibraryResult<Option<NaiveDateTime>>;
}
