//! Main application loop - eframe::App implementation.
//!
//! Contains the core update() method that runs each frame:
//! - Event processing and timer expiry
//! - UI rendering (cards, form, dialogs)
//! - Input handling
//! - Settings persistence

use eframe::{egui, glow};
use log::{info, trace};

use crate::app::GuestbookApp;
use crate::dialogs::prefs::prefs_events::ResetSettingsEvent;
use crate::dialogs::prefs::render_settings_window;
use crate::entities::Viewport;

impl eframe::App for GuestbookApp {
    /// Main frame update - called every frame by eframe.
    ///
    /// Flow:
    /// 1. Apply theme, font and pending window changes
    /// 2. Keyboard input and bus events
    /// 3. Finished photo decodes, expired shrink timers
    /// 4. Render UI (status bar, drifting cards, form, settings)
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        // Apply theme based on settings
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Apply font size from settings
        let mut style = (*ctx.style()).clone();
        for (_, font_id) in style.text_styles.iter_mut() {
            font_id.size = self.settings.font_size;
        }
        ctx.set_style(style);

        self.apply_font_if_changed(ctx, now);

        // Apply pending fullscreen changes requested via events
        if self.fullscreen_dirty {
            self.set_cinema_mode(ctx, self.is_fullscreen);
            self.fullscreen_dirty = false;
        }

        // Apply pending settings reset requested via events
        if self.reset_settings_pending {
            self.reset_settings();
            if self.is_fullscreen {
                self.set_cinema_mode(ctx, false);
            }
            self.reset_settings_pending = false;
        }

        self.handle_keyboard_input(ctx);
        self.handle_events(now);
        self.finish_decodes(now);

        for id in self.book.tick(now) {
            trace!("Entry {} back to normal size", id);
        }

        // Update status messages BEFORE laying out panels
        self.status_bar.update(now);

        // Status bar (bottom panel)
        if self.settings.show_status_bar && !self.is_fullscreen {
            let pending = self.pending_decodes();
            self.status_bar
                .render(ctx, &self.book, now, pending, |evt| self.event_bus.emit_boxed(evt));
        }

        let emitter = self.event_bus.emitter();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewport = Viewport::from(ui.max_rect());
            self.cards
                .render(ui, self.book.snapshot(), now, &self.settings, &emitter);
        });

        let pending = self.pending_decodes();
        self.form
            .render(ctx, self.settings.photo_source, pending, &emitter);

        // Settings window (can be shown even in cinema mode)
        if self.show_settings {
            render_settings_window(ctx, &mut self.show_settings, &mut self.settings, || {
                emitter.emit(ResetSettingsEvent)
            });
            self.apply_settings_to_core();
        }

        // Cards drift continuously
        ctx.request_repaint();
    }

    /// Save settings to persistent storage. Entries are never saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(&self.settings) {
            storage.set_string(eframe::APP_KEY, json);
            trace!(
                "Settings saved: window={:.1}s policy={}",
                self.settings.enlarge_secs,
                self.settings.enlarge_policy.as_str()
            );
        }
    }

    /// Cleanup on application exit.
    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        let pending = self.pending_decodes();
        if pending > 0 {
            info!("Exiting with {} photo decodes still running", pending);
        }
        // Dropping the decoder closes its job channel and joins idle workers
        self.decoder = None;
    }
}

impl GuestbookApp {
    /// Toggle cinema/fullscreen mode.
    pub fn set_cinema_mode(&mut self, ctx: &egui::Context, enabled: bool) {
        self.is_fullscreen = enabled;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(enabled));
        // No title bar in kiosk mode
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(!enabled));
        ctx.request_repaint();
    }
}
