use chrono::NaiveDateTime;
use tracing::debug;
use crate::core::library::{AssetStatus, LibraryResult};
use crate::core::repository::CirculationTx;

// AssetStatusStore reads and writes the status label of catalog assets within a transaction.
pub(crate) struct AssetStatusStore<'a> {
    tx: &'a mut dyn CirculationTx,
}

impl<'a> AssetStatusStore<'a> {
    pub(crate) fn new(tx: &'a mut dyn CirculationTx) -> Self {
        Self { tx }
    }

    pub(crate) fn get_status(&mut self, asset_id: &str) -> LibraryResult<AssetStatus> {
        self.tx.assets().get(asset_id).map(|asset| asset.status)
    }

    pub(crate) fn set_status(&mut self, asset_id: &str, status: AssetStatus, now: NaiveDateTime) -> LibraryResult<()> {
        let mut asset = self.tx.assets().get(asset_id)?;
        debug!(asset_id, from = %asset.status, to = %status, "asset status changed");
        asset.status = status;
        asset.updated_at = now;
        self.tx.assets().update(&asset)?;
        Ok(())
    }
}
