//! In-process broadcast primitives.
//!
//! The storefront uses this to tell every open view that shared client state
//! changed (e.g. the cart), so each can re-render from storage.

use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 16;

/// A broadcast bus for a single event type. Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct EventBus<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> EventBus<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    ///
    /// A bus with no subscribers drops the event; that is the expected state
    /// when only one view is open.
    pub fn publish(&self, event: T) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event published with no subscribers");
        }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Updated,
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(TestEvent::Updated);

        assert_eq!(rx.recv().await.unwrap(), TestEvent::Updated);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let bus: EventBus<TestEvent> = EventBus::new();
        bus.publish(TestEvent::Updated);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn clones_share_the_channel() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.clone().publish(TestEvent::Updated);

        assert_eq!(rx.recv().await.unwrap(), TestEvent::Updated);
    }
}
