use std::sync::Arc;
use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};
use crate::assets::domain::status::AssetStatusStore;
use crate::checkout::domain::ledger::CheckoutLedger;
use crate::checkout::dto::{CheckoutDto, CheckoutHistoryDto};
use crate::circulation::domain::{CheckinOutcome, CheckoutOutcome, CirculationService};
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::events::{DomainEvent, DomainEventType};
use crate::core::library::{AssetStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{CirculationStore, CirculationTx};
use crate::gateway::events::EventPublisher;
use crate::hold::domain::model::HoldEntity;
use crate::hold::domain::queue::HoldQueue;
use crate::hold::dto::HoldDto;
use crate::patrons::domain::PatronDirectory;

// What check-in does once the current loan is closed.
enum CheckinStep {
    Release,
    TransferTo(HoldEntity),
}

pub(crate) struct CirculationServiceImpl {
    branch_id: String,
    loan_days: i64,
    store: Arc<dyn CirculationStore>,
    patron_directory: Arc<dyn PatronDirectory>,
    events_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CirculationServiceImpl {
    pub(crate) fn new(config: &Configuration, store: Arc<dyn CirculationStore>,
                      patron_directory: Arc<dyn PatronDirectory>, events_publisher: Arc<dyn EventPublisher>,
                      clock: Arc<dyn Clock>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            loan_days: config.loan_days,
            store,
            patron_directory,
            events_publisher,
            clock,
        }
    }

    fn ledger<'a>(&'a self, tx: &'a mut dyn CirculationTx) -> CheckoutLedger<'a> {
        CheckoutLedger::new(tx, self.branch_id.as_str())
    }

    fn queue<'a>(&'a self, tx: &'a mut dyn CirculationTx) -> HoldQueue<'a> {
        HoldQueue::new(tx, self.branch_id.as_str())
    }

    // Check-out writes, shared by direct check-out and hold fulfilment during check-in.
    fn check_out_in(&self, tx: &mut dyn CirculationTx, asset_id: &str, card_id: &str,
                    now: NaiveDateTime) -> LibraryResult<CheckoutOutcome> {
        if self.ledger(tx).is_checked_out(asset_id)? {
            return Ok(CheckoutOutcome::AlreadyCheckedOut);
        }
        AssetStatusStore::new(tx).set_status(asset_id, AssetStatus::CheckedOut, now)?;
        let until = now + Duration::days(self.loan_days);
        let checkout = self.ledger(tx).record_checkout(asset_id, card_id, now, until)?;
        Ok(CheckoutOutcome::CheckedOut { checkout: CheckoutDto::from(&checkout) })
    }

    fn release(&self, tx: &mut dyn CirculationTx, asset_id: &str, now: NaiveDateTime) -> LibraryResult<CheckinStep> {
        self.ledger(tx).close_active_checkout(asset_id, now)?;
        Ok(match self.queue(tx).earliest_hold(asset_id)? {
            Some(hold) => CheckinStep::TransferTo(hold),
            None => CheckinStep::Release,
        })
    }

    fn check_in_in(&self, tx: &mut dyn CirculationTx, asset_id: &str, now: NaiveDateTime) -> LibraryResult<CheckinOutcome> {
        AssetStatusStore::new(tx).get_status(asset_id)?;
        match self.release(tx, asset_id, now)? {
            CheckinStep::Release => {
                AssetStatusStore::new(tx).set_status(asset_id, AssetStatus::Available, now)?;
                Ok(CheckinOutcome::Available)
            }
            CheckinStep::TransferTo(hold) => {
                self.queue(tx).consume_hold(&hold)?;
                match self.check_out_in(tx, asset_id, hold.card_id.as_str(), now)? {
                    CheckoutOutcome::CheckedOut { checkout } => {
                        Ok(CheckinOutcome::TransferredToHold { hold: HoldDto::from(&hold), checkout })
                    }
                    CheckoutOutcome::AlreadyCheckedOut => {
                        Err(LibraryError::runtime(format!("asset {} still checked out after check-in",
                                                          asset_id).as_str(), None))
                    }
                }
            }
        }
    }

    // Runs read-only work in a transaction that is never committed.
    async fn read<T, F>(&self, f: F) -> LibraryResult<T>
        where F: FnOnce(&mut dyn CirculationTx) -> LibraryResult<T> + Send {
        let mut tx = self.store.begin().await?;
        f(tx.as_mut())
    }

    async fn patron_name(&self, card_id: &str) -> LibraryResult<String> {
        Ok(self.patron_directory.find_patron_by_card(card_id).await?
            .map(|patron| patron.display_name())
            .unwrap_or_default())
    }

    // The operation has already committed, so a publishing failure is only logged.
    async fn publish<T: Serialize + Sync>(&self, kind: DomainEventType, asset_id: &str, data: &T, now: NaiveDateTime) {
        let res = match DomainEvent::new(kind, self.branch_id.as_str(), asset_id, data, now) {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(LibraryError::from(err)),
        };
        if let Err(err) = res {
            warn!(asset_id, event = %kind, error = %err, "failed to publish domain event");
        }
    }
}

#[async_trait]
impl CirculationService for CirculationServiceImpl {
    async fn check_out_item(&self, asset_id: &str, card_id: &str) -> LibraryResult<CheckoutOutcome> {
        let card = self.patron_directory.find_card_by_id(card_id).await?;
        let mut tx = self.store.begin().await?;
        let now = self.clock.now();
        let outcome = self.check_out_in(tx.as_mut(), asset_id, card.card_id.as_str(), now)?;
        tx.commit()?;
        match &outcome {
            CheckoutOutcome::CheckedOut { checkout } => {
                info!(asset_id, card_id, until = %checkout.until, "checked out item");
                self.publish(DomainEventType::ItemCheckedOut, asset_id, checkout, now).await;
            }
            CheckoutOutcome::AlreadyCheckedOut => {
                info!(asset_id, card_id, "item is already checked out, ignoring checkout");
            }
        }
        Ok(outcome)
    }

    async fn check_in_item(&self, asset_id: &str) -> LibraryResult<CheckinOutcome> {
        let mut tx = self.store.begin().await?;
        let now = self.clock.now();
        let outcome = self.check_in_in(tx.as_mut(), asset_id, now)?;
        tx.commit()?;
        self.publish(DomainEventType::ItemCheckedIn, asset_id, &outcome, now).await;
        match &outcome {
            CheckinOutcome::Available => {
                info!(asset_id, "checked in item, now available");
            }
            CheckinOutcome::TransferredToHold { hold, checkout } => {
                info!(asset_id, card_id = hold.card_id.as_str(), hold_id = hold.hold_id.as_str(),
                    "checked in item and checked it out to the earliest hold");
                self.publish(DomainEventType::HoldFulfilled, asset_id, hold, now).await;
                self.publish(DomainEventType::ItemCheckedOut, asset_id, checkout, now).await;
            }
        }
        Ok(outcome)
    }

    async fn place_hold(&self, asset_id: &str, card_id: &str) -> LibraryResult<HoldDto> {
        let card = self.patron_directory.find_card_by_id(card_id).await?;
        let mut tx = self.store.begin().await?;
        let now = self.clock.now();
        let status = AssetStatusStore::new(tx.as_mut()).get_status(asset_id)?;
        if status == AssetStatus::Available {
            AssetStatusStore::new(tx.as_mut()).set_status(asset_id, AssetStatus::OnHold, now)?;
        }
        let hold = self.queue(tx.as_mut()).place_hold(asset_id, card.card_id.as_str(), now)?;
        tx.commit()?;
        let hold = HoldDto::from(&hold);
        info!(asset_id, card_id, hold_id = hold.hold_id.as_str(), status = %status, "placed hold");
        self.publish(DomainEventType::HoldPlaced, asset_id, &hold, now).await;
        Ok(hold)
    }

    async fn mark_lost(&self, asset_id: &str) -> LibraryResult<()> {
        let mut tx = self.store.begin().await?;
        let now = self.clock.now();
        AssetStatusStore::new(tx.as_mut()).set_status(asset_id, AssetStatus::Lost, now)?;
        tx.commit()?;
        info!(asset_id, "marked item lost");
        self.publish(DomainEventType::ItemLost, asset_id, &AssetStatus::Lost, now).await;
        Ok(())
    }

    async fn mark_found(&self, asset_id: &str) -> LibraryResult<()> {
        let mut tx = self.store.begin().await?;
        let now = self.clock.now();
        AssetStatusStore::new(tx.as_mut()).set_status(asset_id, AssetStatus::Available, now)?;
        let closed: Vec<CheckoutHistoryDto> = self.ledger(tx.as_mut()).close_active_checkout(asset_id, now)?
            .iter().map(CheckoutHistoryDto::from).collect();
        tx.commit()?;
        info!(asset_id, closed = closed.len(), "marked item found");
        self.publish(DomainEventType::ItemFound, asset_id, &closed, now).await;
        Ok(())
    }

    async fn get_asset_status(&self, asset_id: &str) -> LibraryResult<AssetStatus> {
        self.read(|tx| AssetStatusStore::new(tx).get_status(asset_id)).await
    }

    async fn is_checked_out(&self, asset_id: &str) -> LibraryResult<bool> {
        self.read(|tx| self.ledger(tx).is_checked_out(asset_id)).await
    }

    async fn get_latest_checkout(&self, asset_id: &str) -> LibraryResult<Option<CheckoutDto>> {
        let latest = self.read(|tx| self.ledger(tx).latest_checkout(asset_id)).await?;
        Ok(latest.as_ref().map(CheckoutDto::from))
    }

    async fn get_checkout_by_id(&self, checkout_id: &str) -> LibraryResult<CheckoutDto> {
        let checkout = self.read(|tx| self.ledger(tx).get_checkout(checkout_id)).await?;
        Ok(CheckoutDto::from(&checkout))
    }

    async fn get_all_checkouts(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>> {
        let res = self.read(|tx| self.ledger(tx).all_checkouts(page, page_size)).await?;
        let records = res.records.iter().map(CheckoutDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }

    async fn get_checkout_history(&self, asset_id: &str) -> LibraryResult<Vec<CheckoutHistoryDto>> {
        let histories = self.read(|tx| self.ledger(tx).history_for(asset_id)).await?;
        Ok(histories.iter().map(CheckoutHistoryDto::from).collect())
    }

    async fn get_current_holds(&self, asset_id: &str) -> LibraryResult<Vec<HoldDto>> {
        let mut holds = self.read(|tx| self.queue(tx).holds_for(asset_id)).await?;
        holds.sort_by_key(|h| h.hold_placed);
        Ok(holds.iter().map(HoldDto::from).collect())
    }

    async fn get_checkouts_for_card(&self, card_id: &str) -> LibraryResult<Vec<CheckoutDto>> {
        let checkouts = self.read(|tx| self.ledger(tx).checkouts_for_card(card_id)).await?;
        Ok(checkouts.iter().map(CheckoutDto::from).collect())
    }

    async fn get_holds_for_card(&self, card_id: &str) -> LibraryResult<Vec<HoldDto>> {
        let holds = self.read(|tx| self.queue(tx).holds_for_card(card_id)).await?;
        Ok(holds.iter().map(HoldDto::from).collect())
    }

    async fn get_history_for_card(&self, card_id: &str) -> LibraryResult<Vec<CheckoutHistoryDto>> {
        let histories = self.read(|tx| self.ledger(tx).history_for_card(card_id)).await?;
        Ok(histories.iter().map(CheckoutHistoryDto::from).collect())
    }

    async fn query_overdue(&self) -> LibraryResult<Vec<CheckoutDto>> {
        let now = self.clock.now();
        let overdue = self.read(|tx| self.ledger(tx).overdue(now)).await?;
        Ok(overdue.iter().map(CheckoutDto::from).collect())
    }

    async fn get_current_checkout_patron(&self, asset_id: &str) -> LibraryResult<String> {
        match self.read(|tx| self.ledger(tx).latest_checkout(asset_id)).await? {
            Some(checkout) => self.patron_name(checkout.card_id.as_str()).await,
            None => Ok(String::new()),
        }
    }

    async fn get_current_hold_patron_name(&self, hold_id: &str) -> LibraryResult<String> {
        match self.read(|tx| self.queue(tx).get_hold(hold_id)).await? {
            Some(hold) => self.patron_name(hold.card_id.as_str()).await,
            None => Ok(String::new()),
        }
    }

    async fn get_current_hold_placed(&self, hold_id: &str) -> LibraryResult<Option<NaiveDateTime>> {
        let hold = self.read(|tx| self.queue(tx).get_hold(hold_id)).await?;
        Ok(hold.map(|h| h.hold_placed))
    }
}
