use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::core::library::{LibraryError, LibraryResult};
use crate::patrons::domain::PatronDirectory;
use crate::patrons::dto::{LibraryCardDto, PatronDto};

// MemoryPatronDirectory keeps cards and patrons in process, keyed by card id.
#[derive(Debug, Default)]
pub struct MemoryPatronDirectory {
    cards: RwLock<HashMap<String, LibraryCardDto>>,
    patrons: RwLock<HashMap<String, PatronDto>>,
}

impl MemoryPatronDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_card(&self, card: LibraryCardDto) {
        self.cards.write().await.insert(card.card_id.to_string(), card);
    }

    // registers the patron and issues its card if the card is not known yet
    pub async fn add_patron(&self, patron: PatronDto) {
        self.cards.write().await.entry(patron.card_id.to_string()).or_insert_with(|| LibraryCardDto {
            card_id: patron.card_id.to_string(),
            ..LibraryCardDto::new()
        });
        self.patrons.write().await.insert(patron.card_id.to_string(), patron);
    }
}

#[async_trait]
impl PatronDirectory for MemoryPatronDirectory {
    async fn find_card_by_id(&self, card_id: &str) -> LibraryResult<LibraryCardDto> {
        self.cards.read().await.get(card_id).cloned().ok_or_else(|| LibraryError::not_found(
            format!("library card {} not found", card_id).as_str()))
    }

    async fn find_patron_by_card(&self, card_id: &str) -> LibraryResult<Option<PatronDto>> {
        Ok(self.patrons.read().await.get(card_id).cloned())
    }
}
