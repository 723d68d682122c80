//! Buffer Order Publisher
//!
//! Collects published intents in memory so tests and the demo binary
//! can assert on exactly what the bot emitted.

use parking_lot::Mutex;

use crate::application::ports::{OrderPublisherPort, PublishError};
use crate::domain::trading::OrderIntent;

/// Order publisher that appends every intent to an in-memory buffer.
#[derive(Debug, Default)]
pub struct BufferOrderPublisher {
    items: Mutex<Vec<OrderIntent>>,
}

impl BufferOrderPublisher {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, in order.
    #[must_use]
    pub fn items(&self) -> Vec<OrderIntent> {
        self.items.lock().clone()
    }

    /// Number of published intents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.items.lock().clear();
    }
}

#[async_trait::async_trait]
impl OrderPublisherPort for BufferOrderPublisher {
    async fn publish(&self, intent: OrderIntent) -> Result<(), PublishError> {
        self.items.lock().push(intent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trading::OrderSide;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn publish_records_intents_in_order() {
        let publisher = BufferOrderPublisher::new();
        assert!(publisher.is_empty());

        publisher
            .publish(OrderIntent::new("VN30", OrderSide::Buy, Decimal::ONE))
            .await
            .unwrap();
        publisher
            .publish(OrderIntent::new("VN30", OrderSide::Sell, Decimal::TWO))
            .await
            .unwrap();

        let items = publisher.items();
        assert_eq!(publisher.len(), 2);
        assert_eq!(items[0].side, OrderSide::Buy);
        assert_eq!(items[1].quantity, Decimal::TWO);
    }

    #[tokio::test]
    async fn clear_empties_the_buffer() {
        let publisher = BufferOrderPublisher::new();
        publisher
            .publish(OrderIntent::new("VN30", OrderSide::Buy, Decimal::ONE))
            .await
            .unwrap();

        publisher.clear();
        assert!(publisher.is_empty());
    }
}
