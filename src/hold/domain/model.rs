use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;
use crate::utils::memory::MemoryRecord;

// HoldEntity is a card waiting for an asset; it is deleted once it turns into a checkout.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldEntity {
    pub hold_id: String,
    pub version: i64,
    pub branch_id: String,
    pub asset_id: String,
    pub card_id: String,
    #[serde(with = "serializer")]
    pub hold_placed: NaiveDateTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl HoldEntity {
    pub fn new(branch_id: &str, asset_id: &str, card_id: &str, hold_placed: NaiveDateTime) -> Self {
        Self {
            hold_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            asset_id: asset_id.to_string(),
            card_id: card_id.to_string(),
            hold_placed,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for HoldEntity {
    fn id(&self) -> String {
        self.hold_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl MemoryRecord for HoldEntity {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "hold_id" => Some(self.hold_id.to_string()),
            "asset_id" => Some(self.asset_id.to_string()),
            "card_id" => Some(self.card_id.to_string()),
            _ => None,
        }
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}
