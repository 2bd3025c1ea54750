use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::hold::domain::model::HoldEntity;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldDto {
    pub hold_id: String,
    pub branch_id: String,
    pub asset_id: String,
    pub card_id: String,
    #[serde(with = "serializer")]
    pub hold_placed: NaiveDateTime,
}

impl From<&HoldEntity> for HoldDto {
    fn from(other: &HoldEntity) -> HoldDto {
        HoldDto {
            hold_id: other.hold_id.to_string(),
            branch_id: other.branch_id.to_string(),
            asset_id: other.asset_id.to_string(),
            card_id: other.card_id.to_string(),
            hold_placed: other.hold_placed,
        }
    }
}
