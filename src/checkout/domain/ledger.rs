use chrono::NaiveDateTime;
use tracing::{debug, warn};
use crate::checkout::domain::model::{CheckoutEntity, CheckoutHistoryEntity};
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{predicate, query_all, CirculationTx};

// CheckoutLedger owns the active checkouts and the checkout history of assets.
pub(crate) struct CheckoutLedger<'a> {
    tx: &'a mut dyn CirculationTx,
    branch_id: &'a str,
}

impl<'a> CheckoutLedger<'a> {
    pub(crate) fn new(tx: &'a mut dyn CirculationTx, branch_id: &'a str) -> Self {
        Self { tx, branch_id }
    }

    /// Opens a loan: one active checkout plus one open history row.
    ///
    /// Fails with `DuplicateKey` if the asset already has an active checkout or an open
    /// history row, so the one-loan-per-asset rule holds for every caller.
    pub(crate) fn record_checkout(&mut self, asset_id: &str, card_id: &str,
                                  since: NaiveDateTime, until: NaiveDateTime) -> LibraryResult<CheckoutEntity> {
        if self.is_checked_out(asset_id)? {
            return Err(LibraryError::duplicate_key(
                format!("asset {} already has an active checkout", asset_id).as_str()));
        }
        if !self.open_histories(asset_id)?.is_empty() {
            return Err(LibraryError::duplicate_key(
                format!("asset {} already has an open checkout history", asset_id).as_str()));
        }
        let checkout = CheckoutEntity::new(self.branch_id, asset_id, card_id, since, until);
        self.tx.checkouts().create(&checkout)?;
        let history = CheckoutHistoryEntity::new(self.branch_id, asset_id, card_id, since);
        self.tx.histories().create(&history)?;
        debug!(asset_id, card_id, checkout_id = checkout.checkout_id.as_str(), "recorded checkout");
        Ok(checkout)
    }

    /// Removes the active checkout and closes the open history row of the asset.
    ///
    /// Either step is skipped when there is nothing to remove or close. Returns the
    /// history rows that were closed.
    pub(crate) fn close_active_checkout(&mut self, asset_id: &str, now: NaiveDateTime) -> LibraryResult<Vec<CheckoutHistoryEntity>> {
        for checkout in self.active_checkouts(asset_id)? {
            self.tx.checkouts().delete(checkout.checkout_id.as_str())?;
        }
        let open = self.open_histories(asset_id)?;
        if open.len() > 1 {
            warn!(asset_id, open = open.len(), "closing more than one open checkout history");
        }
        let mut closed = vec![];
        for mut history in open {
            history.checked_in = Some(now);
            history.updated_at = now;
            self.tx.histories().update(&history)?;
            history.version += 1;
            closed.push(history);
        }
        Ok(closed)
    }

    pub(crate) fn latest_checkout(&mut self, asset_id: &str) -> LibraryResult<Option<CheckoutEntity>> {
        Ok(self.active_checkouts(asset_id)?.into_iter().max_by_key(|c| c.since))
    }

    // history rows of the asset, oldest episode first
    pub(crate) fn history_for(&mut self, asset_id: &str) -> LibraryResult<Vec<CheckoutHistoryEntity>> {
        let mut histories = query_all(self.tx.histories(), &predicate(&[("asset_id", asset_id)]))?;
        histories.sort_by_key(|h| h.checked_out);
        Ok(histories)
    }

    pub(crate) fn is_checked_out(&mut self, asset_id: &str) -> LibraryResult<bool> {
        let res = self.tx.checkouts().query(&predicate(&[("asset_id", asset_id)]), None, 1)?;
        Ok(!res.records.is_empty())
    }

    pub(crate) fn get_checkout(&mut self, checkout_id: &str) -> LibraryResult<CheckoutEntity> {
        self.tx.checkouts().get(checkout_id)
    }

    pub(crate) fn all_checkouts(&mut self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<CheckoutEntity>> {
        self.tx.checkouts().query(&predicate(&[]), page, page_size)
    }

    pub(crate) fn checkouts_for_card(&mut self, card_id: &str) -> LibraryResult<Vec<CheckoutEntity>> {
        let mut checkouts = query_all(self.tx.checkouts(), &predicate(&[("card_id", card_id)]))?;
        checkouts.sort_by_key(|c| c.since);
        Ok(checkouts)
    }

    pub(crate) fn history_for_card(&mut self, card_id: &str) -> LibraryResult<Vec<CheckoutHistoryEntity>> {
        let mut histories = query_all(self.tx.histories(), &predicate(&[("card_id", card_id)]))?;
        histories.sort_by_key(|h| h.checked_out);
        Ok(histories)
    }

    // active checkouts whose due date has passed, most overdue first
    pub(crate) fn overdue(&mut self, now: NaiveDateTime) -> LibraryResult<Vec<CheckoutEntity>> {
        let mut overdue: Vec<CheckoutEntity> = query_all(self.tx.checkouts(), &predicate(&[]))?
            .into_iter()
            .filter(|c| c.until < now)
            .collect();
        overdue.sort_by_key(|c| c.until);
        Ok(overdue)
    }

    fn active_checkouts(&mut self, asset_id: &str) -> LibraryResult<Vec<CheckoutEntity>> {
        query_all(self.tx.checkouts(), &predicate(&[("asset_id", asset_id)]))
    }

    fn open_histories(&mut self, asset_id: &str) -> LibraryResult<Vec<CheckoutHistoryEntity>> {
        query_all(self.tx.histories(), &predicate(&[("asset_id", asset_id), ("open", "true")]))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::checkout::domain::ledger::CheckoutLedger;
    use crate::core::library::LibraryError;
    use crate::core::repository::CirculationStore;
    use crate::core::repository::memory_store::MemoryStore;

    #[tokio::test]
    async fn test_should_record_checkout_with_open_history() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.expect("should begin");
        let mut ledger = CheckoutLedger::new(tx.as_mut(), "test");
        let since = Utc::now().naive_utc();

        assert!(!ledger.is_checked_out("asset1").expect("should query"));
        let checkout = ledger.record_checkout("asset1", "card1", since, since + Duration::days(30)).expect("should record");
        assert!(ledger.is_checked_out("asset1").expect("should query"));
        assert_eq!(Some(checkout.clone()), ledger.latest_checkout("asset1").expect("should query"));

        let history = ledger.history_for("asset1").expect("should query");
        assert_eq!(1, history.len());
        assert_eq!("card1", history[0].card_id.as_str());
        assert_eq!(since, history[0].checked_out);
        assert!(history[0].is_open());
    }

    #[tokio::test]
    async fn test_should_reject_second_active_checkout() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.expect("should begin");
        let mut ledger = CheckoutLedger::new(tx.as_mut(), "test");
        let since = Utc::now().naive_utc();

        let first = ledger.record_checkout("asset1", "card1", since, since + Duration::days(30)).expect("should record");
        let res = ledger.record_checkout("asset1", "card2", since, since + Duration::days(30));
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(Some(first), ledger.latest_checkout("asset1").expect("should query"));
        assert_eq!(1, ledger.history_for("asset1").expect("should query").len());
    }

    #[tokio::test]
    async fn test_should_close_active_checkout_idempotently() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.expect("should begin");
        let mut ledger = CheckoutLedger::new(tx.as_mut(), "test");
        let since = Utc::now().naive_utc();
        let now = since + Duration::days(3);

        assert!(ledger.close_active_checkout("asset1", now).expect("should close").is_empty());
        ledger.record_checkout("asset1", "card1", since, since + Duration::days(30)).expect("should record");
        let closed = ledger.close_active_checkout("asset1", now).expect("should close");
        assert_eq!(1, closed.len());
        assert_eq!(Some(now), closed[0].checked_in);
        assert!(!ledger.is_checked_out("asset1").expect("should query"));
        assert_eq!(None, ledger.latest_checkout("asset1").expect("should query"));
        assert!(ledger.close_active_checkout("asset1", now).expect("should close").is_empty());

        let history = ledger.history_for("asset1").expect("should query");
        assert_eq!(1, history.len());
        assert_eq!(Some(now), history[0].checked_in);
    }

    #[tokio::test]
    async fn test_should_list_by_card_and_overdue() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.expect("should begin");
        let mut ledger = CheckoutLedger::new(tx.as_mut(), "test");
        let since = Utc::now().naive_utc();

        ledger.record_checkout("asset1", "card1", since, since + Duration::days(1)).expect("should record");
        ledger.record_checkout("asset2", "card1", since, since + Duration::days(30)).expect("should record");
        ledger.record_checkout("asset3", "card2", since, since + Duration::days(2)).expect("should record");

        assert_eq!(2, ledger.checkouts_for_card("card1").expect("should query").len());
        assert_eq!(1, ledger.history_for_card("card2").expect("should query").len());
        let overdue = ledger.overdue(since + Duration::days(5)).expect("should query");
        assert_eq!(vec!["asset1", "asset3"], overdue.iter().map(|c| c.asset_id.as_str()).collect::<Vec<_>>());

        let page = ledger.all_checkouts(None, 2).expect("should query");
        assert_eq!(2, page.records.len());
        assert!(page.next_page.is_some());
        let checkout_id = page.records[0].checkout_id.clone();
        assert_eq!(checkout_id, ledger.get_checkout(checkout_id.as_str()).expect("should get").checkout_id);
        assert!(matches!(ledger.get_checkout("missing"), Err(LibraryError::NotFound { .. })));
    }
}
