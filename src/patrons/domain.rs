pub mod directory;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::patrons::dto::{LibraryCardDto, PatronDto};

// PatronDirectory resolves library cards and their patrons; circulation only reads from it.
#[async_trait]
pub trait PatronDirectory: Sync + Send {
    async fn find_card_by_id(&self, card_id: &str) -> LibraryResult<LibraryCardDto>;
    async fn find_patron_by_card(&self, card_id: &str) -> LibraryResult<Option<PatronDto>>;
}
