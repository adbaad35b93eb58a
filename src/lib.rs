//! Guestbook - drifting photo guestbook kiosk library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (entry book, decoding, events)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod entities;
pub mod main_events;
pub mod widgets;

// Re-export commonly used types from core
pub use core::event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
pub use core::{EnlargePolicy, EntryBook, PhotoDecoder};

// Re-export entities
pub use entities::{Entry, EntryFactory, EntryId, Photo};

pub use app::GuestbookApp;
