//! Entities module - guestbook data types, free of UI and threading concerns
//!
//! - `entry` - the submission record and its identifiers
//! - `factory` - builds entries from form input with randomized placement
//! - `motion` - derived horizontal drift and fade of a card
//! - `photo` - decoded RGBA photo payload
//! - `geometry` - viewport and card dimensions

pub mod entry;
pub mod factory;
pub mod geometry;
pub mod motion;
pub mod photo;

pub use entry::{Direction, Entry, EntryDraft, EntryId, Placement};
pub use factory::{EntryFactory, TextDefaults};
pub use geometry::{CardStyle, Viewport};
pub use motion::{Motion, MotionSample};
pub use photo::{Photo, PhotoError};
