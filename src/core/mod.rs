//! Core engine modules - entry lifecycle, photo decoding, events
//!
//! These modules run the guestbook independent of how it is drawn.

pub mod decoder;
pub mod entry_book;
pub mod event_bus;

pub use decoder::{DecodeOutcome, DecodeTicket, PhotoDecoder};
pub use entry_book::{EnlargePolicy, EntryBook};
pub use event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
