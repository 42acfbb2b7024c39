//! Publisher that writes order events to the structured log.

use async_trait::async_trait;

use crate::application::ports::{EventPublishError, EventPublisherPort};
use crate::domain::player_order::OrderEvent;

/// Emits one `tracing` record per order event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisherPort for LoggingEventPublisher {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in events {
            let payload = serde_json::to_string(&event).map_err(|e| {
                EventPublishError::PublishFailed {
                    message: e.to_string(),
                }
            })?;
            tracing::info!(
                order_id = %event.order_id(),
                event_type = event.event_type(),
                payload = %payload,
                "Order event"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{OrderId, Timestamp};

    #[tokio::test]
    async fn publishes_every_event() {
        let events = vec![
            OrderEvent::ValidationStarted {
                order_id: OrderId::new("po-1"),
                occurred_at: Timestamp::now(),
            },
            OrderEvent::Completed {
                order_id: OrderId::new("po-1"),
                occurred_at: Timestamp::now(),
            },
        ];
        assert!(LoggingEventPublisher.publish_order_events(events).await.is_ok());
    }
}
