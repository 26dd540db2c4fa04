use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::PublishError;
use crate::events::OutboundEvent;

/// Delivers outbound events to whatever bus the deployment uses.
#[async_trait]
pub trait DomainEventPublisher: Send + Sync {
    async fn publish(&self, event: &OutboundEvent) -> Result<(), PublishError>;
}

/// Publisher that writes each event as a structured log record.
#[derive(Debug, Default, Clone)]
pub struct LoggingEventPublisher;

#[async_trait]
impl DomainEventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &OutboundEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        info!(
            event_id = %event.event_id,
            event_type = event.event_type.as_str(),
            identifier = event.identifier,
            payload = %payload,
            "Domain event published"
        );
        Ok(())
    }
}

/// Sends events after the change they describe has been committed.
///
/// A failed publish is logged and dropped. The committed change stands and the event
/// is not retried.
#[derive(Clone)]
pub struct OutboundEventsService {
    publisher: Arc<dyn DomainEventPublisher>,
}

impl OutboundEventsService {
    pub fn new(publisher: Arc<dyn DomainEventPublisher>) -> Self {
        Self { publisher }
    }

    pub async fn send(&self, event: OutboundEvent) {
        if let Err(e) = self.publisher.publish(&event).await {
            warn!(
                error = %e,
                event_id = %event.event_id,
                event_type = event.event_type.as_str(),
                identifier = event.identifier,
                "Failed to publish domain event"
            );
        }
    }
}
