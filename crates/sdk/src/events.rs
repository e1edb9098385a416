//! Event hub for SDK lifecycle events.
//!
//! Push-based: subscribers register callbacks per event name and are
//! invoked when the event fires. In a browser build the dispatch also goes
//! out as a DOM event on `window`; that side is behind the
//! [`EventDispatcher`] port, and this hub is the port's default
//! implementation for embedders without a DOM.

use std::sync::{Arc, Mutex};

use crate::ports::outbound::EventDispatcher;

/// Name of the event dispatched exactly once when bootstrap completes.
pub const SDK_INITIALIZED_EVENT: &str = "wortal-sdk-initialized";

type Subscriber = Box<dyn FnMut() + Send + 'static>;

/// In-process event hub.
///
/// Holds strong references to subscribers, so they persist until the hub
/// is dropped.
#[derive(Clone, Default)]
pub struct EventHub {
    subscribers: Arc<Mutex<Vec<(String, Subscriber)>>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to an event by name. The callback fires on every dispatch
    /// of that event.
    pub fn subscribe(&self, event_name: &str, callback: impl FnMut() + Send + 'static) {
        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                subscribers.push((event_name.to_string(), Box::new(callback)));
            }
            Err(e) => {
                tracing::error!("event hub lock poisoned on subscribe: {}", e);
            }
        }
    }

    /// Invoke every subscriber registered for `event_name`.
    pub fn emit(&self, event_name: &str) {
        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                for (name, callback) in subscribers.iter_mut() {
                    if name == event_name {
                        callback();
                    }
                }
            }
            Err(e) => {
                tracing::error!("event hub lock poisoned on emit: {}", e);
            }
        }
    }

    /// Number of registered subscribers, across all event names.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl EventDispatcher for EventHub {
    fn dispatch(&self, event_name: &str) {
        self.emit(event_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_subscribe_and_emit() {
        let hub = EventHub::new();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = Arc::clone(&count);
        hub.subscribe(SDK_INITIALIZED_EVENT, move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        hub.emit(SDK_INITIALIZED_EVENT);
        hub.emit(SDK_INITIALIZED_EVENT);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emit_only_reaches_matching_subscribers() {
        let hub = EventHub::new();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = Arc::clone(&count);
        hub.subscribe("other-event", move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        hub.emit(SDK_INITIALIZED_EVENT);

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(hub.subscriber_count(), 1);
    }
}
