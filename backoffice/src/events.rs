//! Event Bus
//!
//! Broadcast channel carrying webhook payloads out of the catalog. A send
//! with no live subscriber is not an error; the event is simply dropped.

use shared::webhook::WebhookPayload;
use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<WebhookPayload>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WebhookPayload> {
        self.tx.subscribe()
    }

    pub fn emit(&self, payload: WebhookPayload) {
        match self.tx.send(payload) {
            Ok(n) => tracing::trace!(receivers = n, "event published"),
            Err(_) => tracing::trace!("event dropped, no subscribers"),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::webhook::{ProductEventKind, WebhookProduct};

    fn payload(event: ProductEventKind) -> WebhookPayload {
        WebhookPayload::new(
            event,
            WebhookProduct {
                id: "prod-1".into(),
                name: "T-Shirt".into(),
                description: String::new(),
                price: rust_decimal::Decimal::ZERO,
                category: "Vêtements".into(),
                style: String::new(),
                color: String::new(),
                size: vec![],
                stock: 0,
                brand: String::new(),
                image: String::new(),
            },
        )
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new(8);
        bus.emit(payload(ProductEventKind::Created));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_receives_in_order() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        bus.emit(payload(ProductEventKind::Created));
        bus.emit(payload(ProductEventKind::Deleted));
        assert_eq!(rx.try_recv().unwrap().event, ProductEventKind::Created);
        assert_eq!(rx.try_recv().unwrap().event, ProductEventKind::Deleted);
    }
}
