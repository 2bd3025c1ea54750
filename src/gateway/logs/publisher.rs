use async_trait::async_trait;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher writes every domain event to the tracing subscriber as a JSON payload.
#[derive(Debug, Default)]
pub struct LogPublisher;

impl LogPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let json = serde_json::to_string(event)?;
        info!(event_id = event.event_id.as_str(), name = event.name.as_str(),
            asset_id = event.asset_id.as_str(), event = json.as_str(), "published domain event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use chrono::Utc;
    use crate::core::events::{DomainEvent, DomainEventType};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogPublisher;

    #[tokio::test]
    async fn test_should_publish() {
        let publisher = LogPublisher::new();
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::new(DomainEventType::ItemLost, "branch", "asset1", &data, Utc::now().naive_utc())
            .expect("build event");
        publisher.publish(&event).await.expect("should publish");
    }
}
