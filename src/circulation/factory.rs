use std::sync::Arc;
use crate::circulation::domain::CirculationService;
use crate::circulation::domain::service::CirculationServiceImpl;
use crate::core::clock::{Clock, SystemClock};
use crate::core::domain::Configuration;
use crate::core::repository::CirculationStore;
use crate::gateway::events::EventPublisher;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;
use crate::patrons::domain::PatronDirectory;

pub fn create_circulation_service(config: &Configuration, store: Arc<dyn CirculationStore>,
                                  patron_directory: Arc<dyn PatronDirectory>,
                                  via: GatewayPublisherVia) -> Arc<dyn CirculationService> {
    let publisher = create_publisher(via);
    create_circulation_service_with(config, store, patron_directory, publisher, Arc::new(SystemClock))
}

// wires the engine to a caller supplied publisher and clock
pub fn create_circulation_service_with(config: &Configuration, store: Arc<dyn CirculationStore>,
                                       patron_directory: Arc<dyn PatronDirectory>,
                                       publisher: Arc<dyn EventPublisher>,
                                       clock: Arc<dyn Clock>) -> Arc<dyn CirculationService> {
    Arc::new(CirculationServiceImpl::new(config, store, patron_directory, publisher, clock))
}
