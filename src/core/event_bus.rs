//! Deferred event queue between widgets and the app.
//!
//! Widgets never touch the entry book directly. They hold a cloneable
//! [`EventEmitter`] and push typed events; the app drains them once per
//! frame with [`EventBus::poll`] and dispatches by downcasting.
//!
//! Events are processed in emission order across all types.

use std::any::Any;
use std::sync::{Arc, Mutex};

use log::warn;

/// Events piling up beyond this are a bug upstream; oldest half is dropped.
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Anything `Send + Sync + 'static` qualifies.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

pub type BoxedEvent = Box<dyn Event>;

type Queue = Arc<Mutex<Vec<BoxedEvent>>>;

fn push_bounded(queue: &Queue, event: BoxedEvent) {
    let mut queue = queue.lock().unwrap_or_else(|e| e.into_inner());
    if queue.len() >= MAX_QUEUE_SIZE {
        let evict_count = queue.len() / 2;
        warn!("Event queue full ({} events), evicting oldest {}", queue.len(), evict_count);
        queue.drain(0..evict_count);
    }
    queue.push(event);
}

#[derive(Clone, Default)]
pub struct EventBus {
    queue: Queue,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit<E: Event>(&self, event: E) {
        push_bounded(&self.queue, Box::new(event));
    }

    pub fn emit_boxed(&self, event: BoxedEvent) {
        push_bounded(&self.queue, event);
    }

    /// Take everything emitted since the last poll.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Handle for widgets.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            queue: Arc::clone(&self.queue),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Cloneable write-only handle onto an [`EventBus`].
#[derive(Clone)]
pub struct EventEmitter {
    queue: Queue,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventEmitter {
    pub fn emit<E: Event>(&self, event: E) {
        push_bounded(&self.queue, Box::new(event));
    }
}

/// Downcast a queued event to its concrete type.
///
/// The double deref matters: `Box<dyn Event>` itself satisfies the blanket
/// `Event` impl, so `event.as_any()` would hand back the box's type id and
/// every downcast would miss.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntryId;
    use crate::widgets::cards::cards_events::EnlargeEntryEvent;
    use crate::widgets::form::form_events::SubmitEntryEvent;

    #[test]
    fn test_poll_preserves_emission_order() {
        let bus = EventBus::new();
        bus.emit(EnlargeEntryEvent(EntryId::new(1)));
        bus.emit(SubmitEntryEvent::without_photo("Jin", "Congrats!"));
        bus.emit(EnlargeEntryEvent(EntryId::new(2)));

        let events = bus.poll();
        assert_eq!(events.len(), 3);
        assert_eq!(downcast_event::<EnlargeEntryEvent>(&events[0]).map(|e| e.0), Some(EntryId::new(1)));
        assert!(downcast_event::<SubmitEntryEvent>(&events[1]).is_some());
        assert!(downcast_event::<EnlargeEntryEvent>(&events[1]).is_none());
        assert_eq!(downcast_event::<EnlargeEntryEvent>(&events[2]).map(|e| e.0), Some(EntryId::new(2)));

        assert!(bus.poll().is_empty());
    }

    #[test]
    fn test_emitter_feeds_same_queue() {
        let bus = EventBus::new();
        let emitter = bus.emitter();
        emitter.emit(EnlargeEntryEvent(EntryId::new(7)));
        emitter.clone().emit(EnlargeEntryEvent(EntryId::new(8)));
        assert_eq!(bus.queue_len(), 2);
        assert_eq!(bus.poll().len(), 2);
        assert_eq!(bus.queue_len(), 0);
    }

    #[test]
    fn test_boxed_emit_downcasts() {
        let bus = EventBus::new();
        bus.emit_boxed(Box::new(EnlargeEntryEvent(EntryId::new(3))));
        let events = bus.poll();
        assert_eq!(downcast_event::<EnlargeEntryEvent>(&events[0]).map(|e| e.0), Some(EntryId::new(3)));
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let bus = EventBus::new();
        for i in 0..(MAX_QUEUE_SIZE as u64 + 1) {
            bus.emit(EnlargeEntryEvent(EntryId::new(i)));
        }
        let events = bus.poll();
        assert_eq!(events.len(), MAX_QUEUE_SIZE / 2 + 1);
        let first = downcast_event::<EnlargeEntryEvent>(&events[0]).map(|e| e.0);
        assert_eq!(first, Some(EntryId::new(MAX_QUEUE_SIZE as u64 / 2)));
    }
}
