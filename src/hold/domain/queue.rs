use chrono::NaiveDateTime;
use tracing::debug;
use crate::core::library::LibraryResult;
use crate::core::repository::{predicate, query_all, CirculationTx};
use crate::hold::domain::model::HoldEntity;

// HoldQueue keeps the pending holds of assets; priority is strictly by hold_placed.
pub(crate) struct HoldQueue<'a> {
    tx: &'a mut dyn CirculationTx,
    branch_id: &'a str,
}

impl<'a> HoldQueue<'a> {
    pub(crate) fn new(tx: &'a mut dyn CirculationTx, branch_id: &'a str) -> Self {
        Self { tx, branch_id }
    }

    // A card may hold the same asset more than once.
    pub(crate) fn place_hold(&mut self, asset_id: &str, card_id: &str, now: NaiveDateTime) -> LibraryResult<HoldEntity> {
        let hold = HoldEntity::new(self.branch_id, asset_id, card_id, now);
        self.tx.holds().create(&hold)?;
        debug!(asset_id, card_id, hold_id = hold.hold_id.as_str(), "placed hold");
        Ok(hold)
    }

    // pending holds of the asset in storage order
    pub(crate) fn holds_for(&mut self, asset_id: &str) -> LibraryResult<Vec<HoldEntity>> {
        query_all(self.tx.holds(), &predicate(&[("asset_id", asset_id)]))
    }

    pub(crate) fn earliest_hold(&mut self, asset_id: &str) -> LibraryResult<Option<HoldEntity>> {
        Ok(self.holds_for(asset_id)?.into_iter().min_by_key(|h| h.hold_placed))
    }

    pub(crate) fn consume_hold(&mut self, hold: &HoldEntity) -> LibraryResult<()> {
        self.tx.holds().delete(hold.hold_id.as_str())?;
        debug!(asset_id = hold.asset_id.as_str(), card_id = hold.card_id.as_str(),
            hold_id = hold.hold_id.as_str(), "consumed hold");
        Ok(())
    }

    pub(crate) fn get_hold(&mut self, hold_id: &str) -> LibraryResult<Option<HoldEntity>> {
        match self.tx.holds().get(hold_id) {
            Ok(hold) => Ok(Some(hold)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn holds_for_card(&mut self, card_id: &str) -> LibraryResult<Vec<HoldEntity>> {
        let mut holds = query_all(self.tx.holds(), &predicate(&[("card_id", card_id)]))?;
        holds.sort_by_key(|h| h.hold_placed);
        Ok(holds)
    }
}
