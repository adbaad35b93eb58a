//! Entry book - the live, append-only collection of guestbook entries.
//!
//! Owns every [`Entry`] for the session and the only code path that flips
//! `enlarged`. Tapping a card enlarges it and arms a shrink timer; timers
//! fire from [`EntryBook::tick`], which the update loop calls every frame
//! with the current UI clock.
//!
//! Time is plain `f64` seconds on whatever monotonic clock the caller uses
//! (egui's `input.time` in the app), so tests advance it by hand.
//!
//! # Usage
//! ```ignore
//! // On tap:
//! book.request_enlarge(id, ctx.input(|i| i.time));
//!
//! // In update loop:
//! for id in book.tick(ctx.input(|i| i.time)) {
//!     log::debug!("{} shrank", id);
//! }
//! ```

use std::time::Duration;

use log::{debug, trace};

use crate::entities::{Entry, EntryId};

/// Default time an entry stays enlarged after a tap.
pub const DEFAULT_ENLARGE_WINDOW: Duration = Duration::from_secs(10);

/// What a second tap does while an entry is still enlarged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum EnlargePolicy {
    /// Every tap arms its own timer and none are cancelled. The oldest timer
    /// still shrinks the entry on schedule, even if a newer tap is pending.
    #[default]
    Independent,
    /// A tap replaces the entry's pending timer, restarting the window.
    Extend,
}

impl EnlargePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnlargePolicy::Independent => "independent",
            EnlargePolicy::Extend => "extend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ShrinkTimer {
    id: EntryId,
    fires_at: f64,
}

#[derive(Debug, Clone)]
pub struct EntryBook {
    entries: Vec<Entry>,
    /// Pending shrinks, kept sorted by `fires_at` (stable for equal times)
    timers: Vec<ShrinkTimer>,
    window: Duration,
    policy: EnlargePolicy,
}

impl Default for EntryBook {
    fn default() -> Self {
        Self::new(DEFAULT_ENLARGE_WINDOW, EnlargePolicy::default())
    }
}

impl EntryBook {
    pub fn new(window: Duration, policy: EnlargePolicy) -> Self {
        Self {
            entries: Vec::new(),
            timers: Vec::new(),
            window,
            policy,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Change the enlarge window. Already armed timers keep their deadline.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    pub fn policy(&self) -> EnlargePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EnlargePolicy) {
        self.policy = policy;
    }

    /// Add an entry at the end.
    pub fn append(&mut self, entry: Entry) {
        debug!("EntryBook: appended {} ({} total)", entry.id(), self.entries.len() + 1);
        self.entries.push(entry);
    }

    /// Enlarge `id` and schedule it to shrink after the window.
    ///
    /// Returns false (and changes nothing) when no entry has that id.
    pub fn request_enlarge(&mut self, id: EntryId, now: f64) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id() == id) else {
            trace!("EntryBook: enlarge for unknown {} ignored", id);
            return false;
        };
        entry.set_enlarged(true);

        if self.policy == EnlargePolicy::Extend {
            self.timers.retain(|t| t.id != id);
        }

        let fires_at = now + self.window.as_secs_f64();
        let slot = self.timers.partition_point(|t| t.fires_at <= fires_at);
        self.timers.insert(slot, ShrinkTimer { id, fires_at });

        debug!(
            "EntryBook: enlarged {} until t={:.2}s ({} timers pending)",
            id,
            fires_at,
            self.timers.len()
        );
        true
    }

    /// Fire every timer due at `now`. Returns the ids that went from
    /// enlarged back to normal, in firing order.
    pub fn tick(&mut self, now: f64) -> Vec<EntryId> {
        let due = self.timers.partition_point(|t| t.fires_at <= now);
        if due == 0 {
            return Vec::new();
        }

        let mut shrunk = Vec::new();
        for timer in self.timers.drain(..due) {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.id() == timer.id)
                && entry.enlarged()
            {
                entry.set_enlarged(false);
                shrunk.push(timer.id);
            }
        }

        if !shrunk.is_empty() {
            debug!("EntryBook: shrank {:?} at t={:.2}s", shrunk, now);
        }
        shrunk
    }

    /// Current entries in append order.
    pub fn snapshot(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn enlarged_count(&self) -> usize {
        self.entries.iter().filter(|e| e.enlarged()).count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending shrink, for scheduling a repaint.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.first().map(|t| t.fires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CardStyle, EntryDraft, EntryFactory, TextDefaults, Viewport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn factory() -> EntryFactory<StdRng> {
        EntryFactory::with_rng(
            StdRng::seed_from_u64(99),
            CardStyle::framed(),
            TextDefaults::default(),
            "%Y-%m-%d",
        )
    }

    fn entry(f: &mut EntryFactory<StdRng>, name: &str, message: &str) -> Entry {
        f.create(EntryDraft::new(name, message), None, Viewport::new(1280.0, 720.0))
    }

    #[test]
    fn test_append_single_entry() {
        let mut f = factory();
        let mut book = EntryBook::default();
        let a = entry(&mut f, "Jin", "Congrats!");
        book.append(a.clone());

        assert_eq!(book.snapshot(), &[a]);
        assert!(!book.snapshot()[0].enlarged());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut f = factory();
        let mut book = EntryBook::default();
        let entries: Vec<Entry> = (0..20).map(|i| entry(&mut f, &format!("guest {}", i), "hi")).collect();
        for e in &entries {
            book.append(e.clone());
        }
        let names: Vec<&str> = book.snapshot().iter().map(|e| e.name()).collect();
        let expected: Vec<String> = (0..20).map(|i| format!("guest {}", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_enlarge_then_auto_shrink() {
        let mut f = factory();
        let mut book = EntryBook::default();
        let a = entry(&mut f, "Jin", "Congrats!");
        let id = a.id();
        book.append(a);

        assert!(book.request_enlarge(id, 0.0));
        assert!(book.snapshot()[0].enlarged());

        assert!(book.tick(9.999).is_empty());
        assert!(book.snapshot()[0].enlarged());

        assert_eq!(book.tick(10.0), vec![id]);
        assert!(!book.snapshot()[0].enlarged());
        assert_eq!(book.pending_timers(), 0);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut f = factory();
        let mut book = EntryBook::default();
        book.append(entry(&mut f, "Jin", "Congrats!"));
        let before = book.snapshot().to_vec();

        assert!(!book.request_enlarge(EntryId::new(0), 1.0));
        assert_eq!(book.snapshot(), before.as_slice());
        assert_eq!(book.pending_timers(), 0);
        assert!(book.tick(100.0).is_empty());
    }

    #[test]
    fn test_independent_first_timer_wins() {
        let mut f = factory();
        let mut book = EntryBook::new(DEFAULT_ENLARGE_WINDOW, EnlargePolicy::Independent);
        let a = entry(&mut f, "Jin", "Congrats!");
        let id = a.id();
        book.append(a);

        book.request_enlarge(id, 0.0);
        book.request_enlarge(id, 5.0);
        assert_eq!(book.pending_timers(), 2);

        // First timer shrinks even though the second tap is still "live"
        assert_eq!(book.tick(10.0), vec![id]);
        assert!(!book.get(id).unwrap().enlarged());

        // Second timer fires on an already shrunk entry
        assert!(book.tick(15.0).is_empty());
        assert_eq!(book.pending_timers(), 0);
    }

    #[test]
    fn test_independent_stale_timer_cuts_new_window() {
        let mut f = factory();
        let mut book = EntryBook::new(DEFAULT_ENLARGE_WINDOW, EnlargePolicy::Independent);
        let a = entry(&mut f, "Jin", "Congrats!");
        let id = a.id();
        book.append(a);

        book.request_enlarge(id, 0.0);
        book.request_enlarge(id, 5.0);
        book.tick(10.0);
        // Re-tapped at 12: the leftover timer from t=5 still fires at 15
        book.request_enlarge(id, 12.0);
        assert_eq!(book.tick(15.0), vec![id]);
        assert!(!book.get(id).unwrap().enlarged());
        assert_eq!(book.next_deadline(), Some(22.0));
    }

    #[test]
    fn test_extend_restarts_window() {
        let mut f = factory();
        let mut book = EntryBook::new(DEFAULT_ENLARGE_WINDOW, EnlargePolicy::Extend);
        let a = entry(&mut f, "Jin", "Congrats!");
        let id = a.id();
        book.append(a);

        book.request_enlarge(id, 0.0);
        book.request_enlarge(id, 5.0);
        assert_eq!(book.pending_timers(), 1);

        assert!(book.tick(10.0).is_empty());
        assert!(book.get(id).unwrap().enlarged());
        assert_eq!(book.tick(15.0), vec![id]);
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut f = factory();
        let mut book = EntryBook::default();
        let a = entry(&mut f, "A", "a");
        let b = entry(&mut f, "B", "b");
        let (ida, idb) = (a.id(), b.id());
        book.append(a);
        book.append(b);

        book.request_enlarge(idb, 1.0);
        book.request_enlarge(ida, 2.0);
        assert_eq!(book.enlarged_count(), 2);
        assert_eq!(book.next_deadline(), Some(11.0));

        assert_eq!(book.tick(30.0), vec![idb, ida]);
        assert_eq!(book.enlarged_count(), 0);
    }

    #[test]
    fn test_custom_window() {
        let mut f = factory();
        let mut book = EntryBook::new(Duration::from_secs(3), EnlargePolicy::Independent);
        let a = entry(&mut f, "Jin", "hi");
        let id = a.id();
        book.append(a);

        book.request_enlarge(id, 100.0);
        assert!(book.tick(102.9).is_empty());
        assert_eq!(book.tick(103.0), vec![id]);
    }
}
