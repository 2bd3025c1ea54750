use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::{opt_serializer, serializer};
use crate::utils::memory::MemoryRecord;

// CheckoutEntity is an active loan of an asset to a library card. It is removed, not
// archived, when the loan ends.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutEntity {
    pub checkout_id: String,
    pub version: i64,
    pub branch_id: String,
    pub asset_id: String,
    pub card_id: String,
    #[serde(with = "serializer")]
    pub since: NaiveDateTime,
    #[serde(with = "serializer")]
    pub until: NaiveDateTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CheckoutEntity {
    pub fn new(branch_id: &str, asset_id: &str, card_id: &str,
               since: NaiveDateTime, until: NaiveDateTime) -> Self {
        Self {
            checkout_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            asset_id: asset_id.to_string(),
            card_id: card_id.to_string(),
            since,
            until,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for CheckoutEntity {
    fn id(&self) -> String {
        self.checkout_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl MemoryRecord for CheckoutEntity {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "checkout_id" => Some(self.checkout_id.to_string()),
            "asset_id" => Some(self.asset_id.to_string()),
            "card_id" => Some(self.card_id.to_string()),
            "branch_id" => Some(self.branch_id.to_string()),
            _ => None,
        }
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

// CheckoutHistoryEntity records one loan episode; checked_in stays empty while the episode is open.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutHistoryEntity {
    pub history_id: String,
    pub version: i64,
    pub branch_id: String,
    pub asset_id: String,
    pub card_id: String,
    #[serde(with = "serializer")]
    pub checked_out: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub checked_in: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CheckoutHistoryEntity {
    pub fn new(branch_id: &str, asset_id: &str, card_id: &str, checked_out: NaiveDateTime) -> Self {
        Self {
            history_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            asset_id: asset_id.to_string(),
            card_id: card_id.to_string(),
            checked_out,
            checked_in: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.checked_in.is_none()
    }
}

impl Identifiable for CheckoutHistoryEntity {
    fn id(&self) -> String {
        self.history_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl MemoryRecord for CheckoutHistoryEntity {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "history_id" => Some(self.history_id.to_string()),
            "asset_id" => Some(self.asset_id.to_string()),
            "card_id" => Some(self.card_id.to_string()),
            "open" => Some(self.is_open().to_string()),
            _ => None,
        }
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}
