//! Event handling for GuestbookApp.
//!
//! Contains handlers for:
//! - Event bus events (handle_events)
//! - Keyboard input (handle_keyboard_input)

use super::GuestbookApp;
use crate::core::event_bus::Event;
use crate::dialogs::prefs::prefs_events::*;
use crate::main_events;

use eframe::egui;
use log::trace;

impl GuestbookApp {
    /// Handle events from event bus.
    pub fn handle_events(&mut self, now: f64) {
        // Submissions are applied after the loop so handlers only see the bus snapshot
        let mut deferred_submits = Vec::new();

        for event in self.event_bus.poll() {
            match main_events::handle_app_event(
                &event,
                &mut self.book,
                now,
                &mut self.settings,
                &mut self.show_settings,
                &mut self.is_fullscreen,
                &mut self.fullscreen_dirty,
                &mut self.reset_settings_pending,
            ) {
                Some(result) => {
                    if let Some(submit) = result.submit {
                        deferred_submits.push(submit);
                    }
                }
                None => trace!("Unhandled event: {}", (*event).type_name()),
            }
        }

        for submit in deferred_submits {
            self.submit(submit, now);
        }
    }

    /// Global hotkeys. Function keys always work; Esc is left to text
    /// fields while one has focus.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let typing = ctx.wants_keyboard_input();
        let (f11, f2, f3, esc) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::F11),
                i.key_pressed(egui::Key::F2),
                i.key_pressed(egui::Key::F3),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if f11 {
            self.event_bus.emit(ToggleFullscreenEvent);
        }
        if f2 {
            self.event_bus.emit(ToggleStatusBarEvent);
        }
        if f3 {
            self.event_bus.emit(ToggleSettingsEvent);
        }
        if esc && !typing {
            self.event_bus.emit(ExitFullscreenEvent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::prefs::KioskSettings;
    use crate::widgets::cards::EnlargeEntryEvent;
    use crate::widgets::form::SubmitEntryEvent;

    #[test]
    fn test_bus_events_reach_book() {
        let mut app = GuestbookApp::new(KioskSettings::default());
        app.event_bus
            .emit(SubmitEntryEvent::without_photo("Ann", "Hello"));
        app.handle_events(1.0);
        assert_eq!(app.book.len(), 1);

        let id = app.book.snapshot()[0].id();
        app.event_bus.emit(EnlargeEntryEvent(id));
        app.handle_events(2.0);
        assert!(app.book.get(id).unwrap().enlarged());

        app.book.tick(12.0);
        assert!(!app.book.get(id).unwrap().enlarged());
    }

    #[test]
    fn test_toggle_events_flip_flags() {
        let mut app = GuestbookApp::new(KioskSettings::default());
        app.event_bus.emit(ToggleFullscreenEvent);
        app.event_bus.emit(ToggleSettingsEvent);
        app.handle_events(0.0);

        assert!(app.is_fullscreen);
        assert!(app.fullscreen_dirty);
        assert!(app.show_settings);
    }
}
