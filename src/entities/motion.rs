//! Horizontal drift of a card across the viewport.
//!
//! A card sweeps linearly from its start edge to its end edge over the
//! entry's traversal duration and then jumps back to start, forever. It is
//! fully opaque for the first 90% of a sweep and fades out over the rest.
//!
//! Leftward sweeps end far past the left edge (`-10 * card_width`) while
//! rightward ones stop one card past the right edge, so the two directions
//! travel at different apparent speeds.

use super::entry::{Direction, Entry, Placement};

/// Fraction of a traversal after which the card starts fading out.
pub const FADE_START: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub start_x: f32,
    pub end_x: f32,
    pub y: f32,
    pub duration_secs: f32,
}

impl Motion {
    pub fn new(placement: &Placement, viewport_width: f32, card_width: f32) -> Self {
        let (start_x, end_x) = match placement.direction {
            Direction::Leftward => (viewport_width + card_width, -card_width * 10.0),
            Direction::Rightward => (-card_width * 2.0, viewport_width + card_width),
        };
        Self {
            start_x,
            end_x,
            y: placement.vertical_position,
            duration_secs: placement.traversal_secs,
        }
    }

    /// Motion for the card box the entry was created with.
    pub fn for_entry(entry: &Entry, viewport_width: f32) -> Self {
        Self::new(entry.placement(), viewport_width, entry.card_style().box_width)
    }

    /// Position within the current loop, in `[0, 1)`.
    pub fn progress(&self, elapsed_secs: f64) -> f32 {
        if self.duration_secs <= 0.0 || elapsed_secs <= 0.0 {
            return 0.0;
        }
        let duration = self.duration_secs as f64;
        (elapsed_secs.rem_euclid(duration) / duration) as f32
    }

    pub fn sample(&self, elapsed_secs: f64) -> MotionSample {
        let t = self.progress(elapsed_secs);
        MotionSample {
            x: self.start_x + (self.end_x - self.start_x) * t,
            y: self.y,
            opacity: opacity_at(t),
        }
    }
}

/// Opacity for a traversal progress in `[0, 1]`.
pub fn opacity_at(progress: f32) -> f32 {
    if progress <= FADE_START {
        1.0
    } else {
        ((1.0 - progress) / (1.0 - FADE_START)).clamp(0.0, 1.0)
    }
}
