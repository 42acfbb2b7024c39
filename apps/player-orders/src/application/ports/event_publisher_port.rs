//! Event Publisher Port (Driven Port)
//!
//! Interface for publishing player order events to external systems.

use async_trait::async_trait;

use crate::domain::player_order::OrderEvent;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// Connection error.
    #[error("Event publish connection error: {message}")]
    ConnectionError {
        /// Error message.
        message: String,
    },

    /// Publishing failed.
    #[error("Event publish failed: {message}")]
    PublishFailed {
        /// Error message.
        message: String,
    },
}

/// Port for publishing domain events.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish order events, in emission order.
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;
}

/// No-op event publisher for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish_order_events(
        &self,
        _events: Vec<OrderEvent>,
    ) -> Result<(), EventPublishError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{OrderId, Timestamp};

    #[tokio::test]
    async fn no_op_publisher_succeeds() {
        let publisher = NoOpEventPublisher;
        let events = vec![
            OrderEvent::BriefUpdated {
                order_id: OrderId::new("po-1"),
                occurred_at: Timestamp::now(),
            },
            OrderEvent::Completed {
                order_id: OrderId::new("po-1"),
                occurred_at: Timestamp::now(),
            },
        ];
        assert!(publisher.publish_order_events(events).await.is_ok());
    }
}
