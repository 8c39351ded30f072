use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::EventError;

/// Events emitted by the lockout service.
///
/// These are intended for audit logging and security monitoring. Handlers run after the
/// lock has been persisted, so they can never change the outcome of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Emitted when an account is locked for exceeding the failed-attempts threshold.
    ///
    /// This is a security-critical event that should trigger alerts.
    AccountLocked {
        /// The account that was locked
        account_identifier: String,
        /// Failed attempts recorded when the lock was applied
        failed_attempts: u32,
        /// The configured threshold
        threshold: u32,
        /// The expiration date written to the account
        locked_at: DateTime<Utc>,
        /// IP address of the triggering request (if available)
        ip_address: Option<String>,
    },

    /// The administrator notification was accepted by the transport.
    NotificationSent {
        account_identifier: String,
        recipients: Vec<String>,
    },

    /// No notification was sent because no recipients or no notifier are configured.
    NotificationSkipped { account_identifier: String },

    /// Delivery of the administrator notification failed.
    NotificationFailed {
        account_identifier: String,
        error: String,
    },
}

/// A trait for handling events emitted by the event bus
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    async fn handle_event(&self, event: &Event) -> Result<(), EventError>;
}

/// Event bus that can emit events and register event handlers
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<RwLock<Vec<Arc<dyn EventHandler>>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register an event handler with the event bus
    pub async fn register(&self, handler: Arc<dyn EventHandler>) {
        self.handlers.write().await.push(handler);
    }

    pub async fn handler_count(&self) -> usize {
        self.handlers.read().await.len()
    }

    /// Emit an event to all registered handlers.
    ///
    /// A failing handler is logged and does not keep later handlers from seeing the event.
    pub async fn emit(&self, event: &Event) {
        for handler in self.handlers.read().await.iter() {
            if let Err(e) = handler.handle_event(event).await {
                tracing::warn!(error = %e, event = ?event, "Event handler failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle_event(&self, event: &Event) -> Result<(), EventError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct CountingHandler {
        call_count: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle_event(&self, _event: &Event) -> Result<(), EventError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct ErroringEventHandler;

    #[async_trait]
    impl EventHandler for ErroringEventHandler {
        async fn handle_event(&self, _event: &Event) -> Result<(), EventError> {
            Err(EventError::HandlerError("Test error".into()))
        }
    }

    fn locked_event() -> Event {
        Event::AccountLocked {
            account_identifier: "alice".to_string(),
            failed_attempts: 5,
            threshold: 5,
            locked_at: Utc::now(),
            ip_address: Some("10.0.0.5".to_string()),
        }
    }

    #[tokio::test]
    async fn test_event_bus_empty() {
        let event_bus = EventBus::default();
        event_bus.emit(&locked_event()).await;
        assert_eq!(event_bus.handler_count().await, 0);
    }

    #[tokio::test]
    async fn test_event_bus_multiple_handlers() {
        let event_bus = EventBus::default();
        let recording = Arc::new(RecordingHandler::default());
        let count = Arc::new(AtomicUsize::new(0));

        event_bus.register(recording.clone()).await;
        event_bus
            .register(Arc::new(CountingHandler {
                call_count: count.clone(),
            }))
            .await;
        assert_eq!(event_bus.handler_count().await, 2);

        let event = locked_event();
        event_bus.emit(&event).await;
        event_bus
            .emit(&Event::NotificationSkipped {
                account_identifier: "alice".to_string(),
            })
            .await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
        let events = recording.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], event);
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_stop_later_handlers() {
        let event_bus = EventBus::default();
        let recording = Arc::new(RecordingHandler::default());
        event_bus.register(Arc::new(ErroringEventHandler)).await;
        event_bus.register(recording.clone()).await;

        let event = locked_event();
        event_bus.emit(&event).await;

        assert_eq!(*recording.events.lock().unwrap(), vec![event]);
    }
}
