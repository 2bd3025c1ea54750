use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// DomainEventType names the circulation change an event reports
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum DomainEventType {
    ItemCheckedOut,
    ItemCheckedIn,
    HoldPlaced,
    HoldFulfilled,
    ItemLost,
    ItemFound,
}

impl Display for DomainEventType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DomainEventType::ItemCheckedOut => write!(f, "item_checked_out"),
            DomainEventType::ItemCheckedIn => write!(f, "item_checked_in"),
            DomainEventType::HoldPlaced => write!(f, "hold_placed"),
            DomainEventType::HoldFulfilled => write!(f, "hold_fulfilled"),
            DomainEventType::ItemLost => write!(f, "item_lost"),
            DomainEventType::ItemFound => write!(f, "item_found"),
        }
    }
}

// DomainEvent is published once the transaction of a circulation operation has committed
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub kind: DomainEventType,
    pub asset_id: String,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn new<T: Serialize>(kind: DomainEventType, branch_id: &str, asset_id: &str,
                             data: &T, now: NaiveDateTime) -> serde_json::Result<Self> {
        let json = serde_json::to_string(data)?;
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: kind.to_string(),
            kind,
            asset_id: asset_id.to_string(),
            metadata: HashMap::from([("branch_id".to_string(), branch_id.to_string())]),
            json_data: json,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use chrono::Utc;
    use crate::core::events::{DomainEvent, DomainEventType};

    #[tokio::test]
    async fn test_should_build_event() {
        let data = HashMap::from([("card_id", "card1")]);
        let event = DomainEvent::new(DomainEventType::HoldPlaced, "branch", "asset1", &data, Utc::now().naive_utc())
            .expect("build event");
        assert_eq!("hold_placed", event.name.as_str());
        assert_eq!("asset1", event.asset_id.as_str());
        assert_eq!(Some(&"branch".to_string()), event.metadata.get("branch_id"));
        assert_eq!(r#"{"card_id":"card1"}"#, event.json_data.as_str());
    }
}
