use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LibraryCardDto {
    pub card_id: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl LibraryCardDto {
    pub fn new() -> Self {
        Self {
            card_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl Default for LibraryCardDto {
    fn default() -> Self {
        Self::new()
    }
}

// Patron abstracts library member holding a card.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronDto {
    pub patron_id: String,
    pub card_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PatronDto {
    pub fn new(card_id: &str, first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            patron_id: Uuid::new_v4().to_string(),
            card_id: card_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}
