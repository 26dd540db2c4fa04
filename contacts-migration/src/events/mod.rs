//! Outbound domain events raised by the sync operations.
//!
//! Migrations never raise events. The records they write already exist in NOMIS, and
//! announcing them would make downstream consumers sync them straight back.
mod publisher;

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub use publisher::{DomainEventPublisher, LoggingEventPublisher, OutboundEventsService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutboundEventType {
    #[serde(rename = "contacts-api.contact.deleted")]
    ContactDeleted,
    #[serde(rename = "contacts-api.organisation.deleted")]
    OrganisationDeleted,
}

impl OutboundEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutboundEventType::ContactDeleted => "contacts-api.contact.deleted",
            OutboundEventType::OrganisationDeleted => "contacts-api.organisation.deleted",
        }
    }
}

/// System a change originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Source {
    Nomis,
    Dps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub event_id: Uuid,
    pub event_type: OutboundEventType,
    pub identifier: i64,
    pub source: Source,
    pub occurred_at: NaiveDateTime,
}

impl OutboundEvent {
    pub fn new(event_type: OutboundEventType, identifier: i64, source: Source) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type,
            identifier,
            source,
            occurred_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_wire_names() {
        let event = OutboundEvent::new(OutboundEventType::ContactDeleted, 42, Source::Nomis);

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["eventType"], "contacts-api.contact.deleted");
        assert_eq!(json["source"], "NOMIS");
        assert_eq!(json["identifier"], 42);
        assert_eq!(json["eventId"], event.event_id.to_string());
    }

    #[test]
    fn test_every_event_gets_its_own_id() {
        let first = OutboundEvent::new(OutboundEventType::OrganisationDeleted, 1, Source::Nomis);
        let second = OutboundEvent::new(OutboundEventType::OrganisationDeleted, 1, Source::Nomis);

        assert_ne!(first.event_id, second.event_id);
        assert_eq!(first.event_type.as_str(), "contacts-api.organisation.deleted");
    }
}
