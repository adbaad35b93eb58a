//! Application event handling - extracted from the app module for clarity.
//!
//! Widgets only emit events; this module is where they change state.
//! Submissions are returned to the caller as deferred work because building
//! an entry needs the factory, the decoder and the current viewport, which
//! the caller owns.

use log::{debug, trace};

use crate::core::EntryBook;
use crate::core::event_bus::{BoxedEvent, downcast_event};
use crate::dialogs::prefs::KioskSettings;
use crate::dialogs::prefs::prefs_events::*;
use crate::widgets::cards::EnlargeEntryEvent;
use crate::widgets::form::SubmitEntryEvent;

/// Result of handling an app event - may contain deferred actions
#[derive(Debug, Default)]
pub struct EventResult {
    pub submit: Option<SubmitEntryEvent>,
}

/// Handle a single app event (called from main event loop).
/// Returns Some(result) if event was handled, None otherwise.
#[allow(clippy::too_many_arguments)]
pub fn handle_app_event(
    event: &BoxedEvent,
    book: &mut EntryBook,
    now: f64,
    settings: &mut KioskSettings,
    show_settings: &mut bool,
    is_fullscreen: &mut bool,
    fullscreen_dirty: &mut bool,
    reset_settings_pending: &mut bool,
) -> Option<EventResult> {
    let mut result = EventResult::default();

    // === Entries ===
    if let Some(e) = downcast_event::<SubmitEntryEvent>(event) {
        debug!(
            "SubmitEntry: name={:?} photo={:?}",
            e.draft.name,
            e.photo.as_ref().map(|p| p.display().to_string())
        );
        result.submit = Some(e.clone());
        return Some(result);
    }
    if let Some(e) = downcast_event::<EnlargeEntryEvent>(event) {
        if !book.request_enlarge(e.0, now) {
            trace!("EnlargeEntry: {} no longer exists", e.0);
        }
        return Some(result);
    }

    // === Window / UI ===
    if downcast_event::<ToggleSettingsEvent>(event).is_some() {
        *show_settings = !*show_settings;
        return Some(result);
    }
    if downcast_event::<ToggleStatusBarEvent>(event).is_some() {
        settings.show_status_bar = !settings.show_status_bar;
        return Some(result);
    }
    if downcast_event::<ToggleFullscreenEvent>(event).is_some() {
        *is_fullscreen = !*is_fullscreen;
        *fullscreen_dirty = true;
        return Some(result);
    }
    if downcast_event::<ExitFullscreenEvent>(event).is_some() {
        if *is_fullscreen {
            *is_fullscreen = false;
            *fullscreen_dirty = true;
        }
        return Some(result);
    }
    if downcast_event::<ResetSettingsEvent>(event).is_some() {
        *reset_settings_pending = true;
        return Some(result);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EnlargePolicy;
    use crate::entities::{CardStyle, EntryDraft, EntryFactory, TextDefaults, Viewport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    #[derive(Default)]
    struct Flags {
        settings: KioskSettings,
        show_settings: bool,
        is_fullscreen: bool,
        fullscreen_dirty: bool,
        reset_pending: bool,
    }

    fn dispatch(event: BoxedEvent, book: &mut EntryBook, now: f64, f: &mut Flags) -> Option<EventResult> {
        handle_app_event(
            &event,
            book,
            now,
            &mut f.settings,
            &mut f.show_settings,
            &mut f.is_fullscreen,
            &mut f.fullscreen_dirty,
            &mut f.reset_pending,
        )
    }

    fn book_with_entry() -> (EntryBook, crate::entities::EntryId) {
        let mut factory = EntryFactory::with_rng(
            StdRng::seed_from_u64(3),
            CardStyle::framed(),
            TextDefaults::default(),
            "%Y",
        );
        let entry = factory.create(EntryDraft::new("Ann", "Hi"), None, Viewport::new(800.0, 600.0));
        let id = entry.id();
        let mut book = EntryBook::new(Duration::from_secs(10), EnlargePolicy::Independent);
        book.append(entry);
        (book, id)
    }

    #[test]
    fn test_enlarge_event_arms_timer() {
        let (mut book, id) = book_with_entry();
        let mut flags = Flags::default();

        let result = dispatch(Box::new(EnlargeEntryEvent(id)), &mut book, 1.0, &mut flags);
        assert!(result.is_some());
        assert!(book.get(id).unwrap().enlarged());
        assert_eq!(book.pending_timers(), 1);
    }

    #[test]
    fn test_submit_is_deferred() {
        let mut book = EntryBook::default();
        let mut flags = Flags::default();

        let result = dispatch(
            Box::new(SubmitEntryEvent::without_photo("Ann", "Hello")),
            &mut book,
            0.0,
            &mut flags,
        )
        .unwrap();
        let submit = result.submit.unwrap();
        assert_eq!(submit.draft.name, "Ann");
        assert!(submit.photo.is_none());
        // Nothing appended until the caller builds the entry
        assert!(book.is_empty());
    }

    #[test]
    fn test_fullscreen_toggle_and_exit() {
        let mut book = EntryBook::default();
        let mut flags = Flags::default();

        dispatch(Box::new(ToggleFullscreenEvent), &mut book, 0.0, &mut flags);
        assert!(flags.is_fullscreen);
        assert!(flags.fullscreen_dirty);

        flags.fullscreen_dirty = false;
        dispatch(Box::new(ExitFullscreenEvent), &mut book, 0.0, &mut flags);
        assert!(!flags.is_fullscreen);
        assert!(flags.fullscreen_dirty);

        // Esc outside fullscreen is a no-op
        flags.fullscreen_dirty = false;
        dispatch(Box::new(ExitFullscreenEvent), &mut book, 0.0, &mut flags);
        assert!(!flags.fullscreen_dirty);
    }

    #[test]
    fn test_toggles_and_reset() {
        let mut book = EntryBook::default();
        let mut flags = Flags::default();

        dispatch(Box::new(ToggleSettingsEvent), &mut book, 0.0, &mut flags);
        assert!(flags.show_settings);

        assert!(flags.settings.show_status_bar);
        dispatch(Box::new(ToggleStatusBarEvent), &mut book, 0.0, &mut flags);
        assert!(!flags.settings.show_status_bar);

        dispatch(Box::new(ResetSettingsEvent), &mut book, 0.0, &mut flags);
        assert!(flags.reset_pending);
    }

    #[test]
    fn test_unknown_event_not_handled() {
        #[derive(Debug)]
        struct Unrelated;
        let mut book = EntryBook::default();
        let mut flags = Flags::default();
        assert!(dispatch(Box::new(Unrelated), &mut book, 0.0, &mut flags).is_none());
    }
}
