use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::{CheckoutEntity, CheckoutHistoryEntity};
use crate::utils::date::{opt_serializer, serializer};

// CheckoutDto is the caller-facing view of an active loan.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutDto {
    pub checkout_id: String,
    pub branch_id: String,
    pub asset_id: String,
    pub card_id: String,
    #[serde(with = "serializer")]
    pub since: NaiveDateTime,
    #[serde(with = "serializer")]
    pub until: NaiveDateTime,
}

impl CheckoutDto {
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.until < now
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutHistoryDto {
    pub history_id: String,
    pub asset_id: String,
    pub card_id: String,
    #[serde(with = "serializer")]
    pub checked_out: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub checked_in: Option<NaiveDateTime>,
}

impl From<&CheckoutEntity> for CheckoutDto {
    fn from(other: &CheckoutEntity) -> CheckoutDto {
        CheckoutDto {
            checkout_id: other.checkout_id.to_string(),
            branch_id: other.branch_id.to_string(),
            asset_id: other.asset_id.to_string(),
            card_id: other.card_id.to_string(),
            since: other.since,
            until: other.until,
        }
    }
}

impl From<&CheckoutHistoryEntity> for CheckoutHistoryDto {
    fn from(other: &CheckoutHistoryEntity) -> CheckoutHistoryDto {
        CheckoutHistoryDto {
            history_id: other.history_id.to_string(),
            asset_id: other.asset_id.to_string(),
            card_id: other.card_id.to_string(),
            checked_out: other.checked_out,
            checked_in: other.checked_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::checkout::domain::model::CheckoutEntity;
    use crate::checkout::dto::CheckoutDto;

    #[tokio::test]
    async fn test_should_detect_overdue_checkout() {
        let since = Utc::now().naive_utc();
        let checkout = CheckoutDto::from(&CheckoutEntity::new("branch", "asset1", "card1", since, since + Duration::days(30)));
        assert_eq!("asset1", checkout.asset_id.as_str());
        assert!(!checkout.is_overdue(since + Duration::days(30)));
        assert!(checkout.is_overdue(since + Duration::days(31)));
    }
}
