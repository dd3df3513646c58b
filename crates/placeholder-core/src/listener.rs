//! Change notification for newly registered placeholders.
//!
//! Observers are called synchronously, in subscription order, on the thread
//! that performed the registration. Every registration fires, including one
//! that redefines an existing name, so observers can react to redefinitions.
//! There is no unsubscribe.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::name::PlaceholderName;
use crate::provider::ProviderId;
use crate::replacer::Replacer;

/// Payload delivered to observers for one registration.
#[derive(Debug, Clone)]
pub struct PlaceholderAddedEvent {
    /// Provider that registered the placeholder.
    pub provider: ProviderId,
    /// Normalised placeholder name.
    pub name: PlaceholderName,
    /// The replacer as supplied by the provider.
    pub replacer: Replacer,
}

/// Observer of placeholder registrations.
///
/// Implemented for any `Fn(&PlaceholderAddedEvent) + Send + Sync` closure.
pub trait PlaceholderListener: Send + Sync {
    /// Called once per registration.
    fn on_placeholder_added(&self, event: &PlaceholderAddedEvent);
}

impl<F> PlaceholderListener for F
where
    F: Fn(&PlaceholderAddedEvent) + Send + Sync,
{
    fn on_placeholder_added(&self, event: &PlaceholderAddedEvent) {
        self(event)
    }
}

/// Ordered list of observers.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<Arc<dyn PlaceholderListener>>>,
}

impl ListenerRegistry {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener` to all future registrations.
    pub fn add(&self, listener: Arc<dyn PlaceholderListener>) {
        self.listeners.write().push(listener);
    }

    /// Returns the number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `event` to every listener.
    ///
    /// Works on a snapshot of the list, so a listener may subscribe others or
    /// register placeholders itself; those listeners first see later events.
    pub fn notify(&self, event: &PlaceholderAddedEvent) {
        let snapshot = self.listeners.read().clone();
        trace!(
            provider = %event.provider,
            placeholder = %event.name,
            listeners = snapshot.len(),
            "Notifying placeholder listeners"
        );
        for listener in snapshot {
            listener.on_placeholder_added(event);
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
