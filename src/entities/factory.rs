//! Entry factory - turns a form submission into an [`Entry`].
//!
//! Rolls the per-entry motion parameters and fills blank text with
//! placeholders. Viewport size comes in as an argument rather than being
//! read from the window, so the factory can be driven from tests with a
//! seeded RNG and a fixed clock.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::entry::{Direction, Entry, EntryDraft, EntryId, Placement};
use super::geometry::{CardStyle, Viewport};
use super::photo::Photo;

/// Traversal duration range in seconds (half-open).
pub const TRAVERSAL_SECS_MIN: f32 = 20.0;
pub const TRAVERSAL_SECS_MAX: f32 = 25.0;

/// Fallback for a broken user-supplied date format: month/day/year.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Replacement text for blank form fields.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub name: String,
    pub message: String,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            name: "Visitor".to_string(),
            message: "Leaving with a good memory!".to_string(),
        }
    }
}

pub struct EntryFactory<R: Rng = StdRng> {
    rng: R,
    card: CardStyle,
    defaults: TextDefaults,
    date_format: String,
    last_id: u64,
}

impl EntryFactory<StdRng> {
    /// Factory seeded from the OS.
    pub fn new(card: CardStyle, defaults: TextDefaults, date_format: impl Into<String>) -> Self {
        Self::with_rng(StdRng::from_os_rng(), card, defaults, date_format)
    }
}

impl<R: Rng> EntryFactory<R> {
    pub fn with_rng(
        rng: R,
        card: CardStyle,
        defaults: TextDefaults,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            rng,
            card,
            defaults,
            date_format: date_format.into(),
            last_id: 0,
        }
    }

    pub fn card_style(&self) -> CardStyle {
        self.card
    }

    pub fn set_card_style(&mut self, card: CardStyle) {
        self.card = card;
    }

    pub fn set_text_defaults(&mut self, defaults: TextDefaults) {
        self.defaults = defaults;
    }

    pub fn set_date_format(&mut self, date_format: impl Into<String>) {
        self.date_format = date_format.into();
    }

    /// Build an entry stamped with the current local time.
    pub fn create(&mut self, draft: EntryDraft, photo: Option<Photo>, viewport: Viewport) -> Entry {
        self.create_at(Local::now(), draft, photo, viewport)
    }

    /// Build an entry stamped with `now`.
    pub fn create_at(
        &mut self,
        now: DateTime<Local>,
        draft: EntryDraft,
        photo: Option<Photo>,
        viewport: Viewport,
    ) -> Entry {
        let id = self.next_id(&now);
        let name = non_blank_or(draft.name, &self.defaults.name);
        let message = non_blank_or(draft.message, &self.defaults.message);
        let created_label = self.date_label(&now);
        let placement = self.placement(viewport);

        trace!(
            "Entry {} placed: y={:.1} {:?} {:.2}s",
            id,
            placement.vertical_position,
            placement.direction,
            placement.traversal_secs
        );

        Entry::new(id, photo, name, message, created_label, placement, self.card)
    }

    /// Roll vertical offset, direction and traversal speed.
    ///
    /// A viewport shorter than a card leaves no room to choose from, so the
    /// card pins to the top edge.
    pub fn placement(&mut self, viewport: Viewport) -> Placement {
        let max_y = viewport.height - self.card.box_height;
        let vertical_position = if max_y > 0.0 {
            below(self.rng.random_range(0.0..max_y), max_y)
        } else {
            0.0
        };

        let direction = if self.rng.random_bool(0.5) {
            Direction::Leftward
        } else {
            Direction::Rightward
        };

        // f32 ranges can round up onto the upper bound
        let traversal_secs = below(
            self.rng
                .random_range(TRAVERSAL_SECS_MIN..TRAVERSAL_SECS_MAX),
            TRAVERSAL_SECS_MAX,
        );

        Placement {
            vertical_position,
            direction,
            traversal_secs,
        }
    }

    /// Millisecond timestamp, bumped past the previous id on collision.
    fn next_id(&mut self, now: &DateTime<Local>) -> EntryId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        EntryId::new(id)
    }

    fn date_label(&self, now: &DateTime<Local>) -> String {
        let mut label = String::new();
        if write!(label, "{}", now.format(&self.date_format)).is_ok() {
            return label;
        }
        label.clear();
        // DEFAULT_DATE_FORMAT is always valid
        let _ = write!(label, "{}", now.format(DEFAULT_DATE_FORMAT));
        label
    }
}

/// Largest value strictly under a positive `bound`.
fn below(value: f32, bound: f32) -> f32 {
    if value < bound {
        value
    } else {
        f32::from_bits(bound.to_bits() - 1)
    }
}

fn non_blank_or(text: String, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
