//! Guestbook entry record.
//!
//! Everything except the `enlarged` flag is fixed at construction. The flag
//! is flipped only by [`EntryBook`](crate::core::EntryBook), which owns the
//! live collection.

use std::fmt;

use super::geometry::CardStyle;
use super::photo::Photo;

/// Entry identifier, derived from creation time in unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which way a card drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Enters at the right edge, exits past the left.
    Leftward,
    /// Enters at the left edge, exits past the right.
    Rightward,
}

/// Motion parameters rolled once per entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub vertical_position: f32,
    pub direction: Direction,
    pub traversal_secs: f32,
}

/// Text captured from the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub name: String,
    pub message: String,
}

impl EntryDraft {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// One guestbook submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    id: EntryId,
    photo: Option<Photo>,
    name: String,
    message: String,
    created_label: String,
    placement: Placement,
    /// Box the placement was rolled for
    card: CardStyle,
    enlarged: bool,
}

impl Entry {
    pub(crate) fn new(
        id: EntryId,
        photo: Option<Photo>,
        name: String,
        message: String,
        created_label: String,
        placement: Placement,
        card: CardStyle,
    ) -> Self {
        Self {
            id,
            photo,
            name,
            message,
            created_label,
            placement,
            card,
            enlarged: false,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_label(&self) -> &str {
        &self.created_label
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn vertical_position(&self) -> f32 {
        self.placement.vertical_position
    }

    pub fn direction(&self) -> Direction {
        self.placement.direction
    }

    pub fn traversal_secs(&self) -> f32 {
        self.placement.traversal_secs
    }

    pub fn card_style(&self) -> CardStyle {
        self.card
    }

    pub fn enlarged(&self) -> bool {
        self.enlarged
    }

    pub(crate) fn set_enlarged(&mut self, enlarged: bool) {
        self.enlarged = enlarged;
    }

    /// Caption strip shown along the bottom of every card.
    pub fn caption(&self) -> String {
        format!("{} - {} ({})", self.name, self.message, self.created_label)
    }
}
