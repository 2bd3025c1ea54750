use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::core::events::{DomainEvent, DomainEventType};
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// MemoryPublisher keeps published events in order so callers can inspect them.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().await.clone()
    }

    pub async fn events_for(&self, asset_id: &str) -> Vec<DomainEventType> {
        self.events.lock().await.iter()
            .filter(|e| e.asset_id == asset_id)
            .map(|e| e.kind)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::core::events::{DomainEvent, DomainEventType};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;

    #[tokio::test]
    async fn test_should_keep_published_events() {
        let publisher = MemoryPublisher::new();
        for kind in [DomainEventType::ItemLost, DomainEventType::ItemFound] {
            let event = DomainEvent::new(kind, "branch", "asset1", &"data", Utc::now().naive_utc())
                .expect("build event");
            publisher.publish(&event).await.expect("should publish");
        }
        assert_eq!(2, publisher.events().await.len());
        assert_eq!(vec![DomainEventType::ItemLost, DomainEventType::ItemFound], publisher.events_for("asset1").await);
        assert!(publisher.events_for("asset2").await.is_empty());
    }
}
