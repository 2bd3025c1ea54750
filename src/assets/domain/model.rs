use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::AssetStatus;
use crate::utils::date::serializer;
use crate::utils::memory::MemoryRecord;

// AssetEntity is the catalog record of a physical item; circulation only reads and writes its status.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AssetEntity {
    pub asset_id: String,
    pub version: i64,
    pub title: String,
    pub status: AssetStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl AssetEntity {
    pub fn new(title: &str, status: AssetStatus) -> Self {
        Self {
            asset_id: Uuid::new_v4().to_string(),
            version: 0,
            title: title.to_string(),
            status,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for AssetEntity {
    fn id(&self) -> String {
        self.asset_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl MemoryRecord for AssetEntity {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "asset_id" => Some(self.asset_id.to_string()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use crate::assets::domain::model::AssetEntity;
    use crate::core::library::AssetStatus;
    use crate::utils::memory::MemoryRecord;

    #[tokio::test]
    async fn test_should_build_asset() {
        let asset = AssetEntity::new("Dune", AssetStatus::Lost);
        assert_eq!("Dune", asset.title.as_str());
        assert_eq!(AssetStatus::Lost, asset.status);
        assert_eq!(Some("Lost".to_string()), asset.attribute("status"));
        assert_eq!(None, asset.attribute("title"));
    }
}
