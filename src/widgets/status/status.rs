use eframe::egui;

use crate::core::EntryBook;
use crate::core::event_bus::BoxedEvent;
use crate::dialogs::prefs::prefs_events::{ToggleFullscreenEvent, ToggleSettingsEvent};

/// Status bar component
#[derive(Debug, Default)]
pub struct StatusBar {
    pub current_message: String,
    /// UI time after which the message is dropped
    message_until: f64,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` for `secs` seconds from `now`.
    pub fn set_message(&mut self, message: impl Into<String>, now: f64, secs: f64) {
        self.current_message = message.into();
        self.message_until = now + secs;
    }

    /// Expire the current message once its time is up
    pub fn update(&mut self, now: f64) {
        if !self.current_message.is_empty() && now >= self.message_until {
            self.current_message.clear();
        }
    }

    /// Render status bar at bottom of screen
    pub fn render(
        &self,
        ctx: &egui::Context,
        book: &EntryBook,
        now: f64,
        pending_decodes: usize,
        mut dispatch: impl FnMut(BoxedEvent),
    ) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(format!("Entries: {}", book.len()));
                ui.separator();

                ui.monospace(format!("Enlarged: {}", book.enlarged_count()));
                ui.separator();

                ui.monospace(format!("Timers: {}", book.pending_timers()));
                if let Some(deadline) = book.next_deadline() {
                    ui.monospace(format!("(next {:.1}s)", (deadline - now).max(0.0)));
                }
                ui.separator();

                if pending_decodes > 0 {
                    ui.monospace(format!("Decoding: {}", pending_decodes));
                    ui.separator();
                }

                ui.monospace(format!(
                    "{:.0}s / {}",
                    book.window().as_secs_f32(),
                    book.policy().as_str()
                ));

                if !self.current_message.is_empty() {
                    ui.separator();
                    ui.monospace(&self.current_message);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Fullscreen (F11)").clicked() {
                        dispatch(Box::new(ToggleFullscreenEvent));
                    }
                    if ui.small_button("Settings (F3)").clicked() {
                        dispatch(Box::new(ToggleSettingsEvent));
                    }
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let mut bar = StatusBar::new();
        bar.set_message("Photo could not be read", 10.0, 4.0);
        bar.update(13.9);
        assert_eq!(bar.current_message, "Photo could not be read");
        bar.update(14.0);
        assert!(bar.current_message.is_empty());
    }
}
