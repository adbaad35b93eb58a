//! Application module - GuestbookApp and related functionality.
//!
//! This module organizes the main application logic into focused submodules:
//! - `events` - Event handling (handle_events, handle_keyboard_input)
//! - `run` - eframe::App implementation (per-frame update, persistence)

mod events;
mod run;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use log::{info, warn};

use crate::core::{DecodeOutcome, DecodeTicket, EntryBook, EventBus, PhotoDecoder};
use crate::dialogs::prefs::KioskSettings;
use crate::entities::{EntryDraft, EntryFactory, EntryId, Photo, Viewport};
use crate::widgets::cards::CardsView;
use crate::widgets::form::{EntryForm, SubmitEntryEvent};
use crate::widgets::status::StatusBar;

/// Window size used until the first frame reports the real panel rect
const INITIAL_VIEWPORT: (f32, f32) = (1280.0, 720.0);

/// How long status bar notices stay visible
const NOTICE_SECS: f64 = 5.0;

/// Main application state.
///
/// Owns the entry book and everything that feeds it. Only `settings` is
/// persisted; entries live for the lifetime of the process.
pub struct GuestbookApp {
    pub settings: KioskSettings,
    pub book: EntryBook,
    pub factory: EntryFactory,
    /// `None` when no worker thread could be spawned; photos then decode inline
    pub decoder: Option<PhotoDecoder>,
    pub event_bus: EventBus,
    pub form: EntryForm,
    pub cards: CardsView,
    pub status_bar: StatusBar,
    /// Last known drawing area of the central panel
    pub viewport: Viewport,
    pub show_settings: bool,
    pub is_fullscreen: bool,
    pub fullscreen_dirty: bool,
    pub reset_settings_pending: bool,
    /// Font currently installed in the egui context
    pub applied_font: Option<PathBuf>,
}

impl Default for GuestbookApp {
    fn default() -> Self {
        Self::new(KioskSettings::default())
    }
}

impl GuestbookApp {
    pub fn new(settings: KioskSettings) -> Self {
        let book = EntryBook::new(settings.enlarge_window(), settings.enlarge_policy);
        let factory = EntryFactory::new(
            settings.card_style,
            settings.text_defaults.clone(),
            settings.date_format.clone(),
        );

        let decoder = match PhotoDecoder::new(settings.decode_workers as usize) {
            Ok(decoder) => Some(decoder),
            Err(e) => {
                warn!("Failed to spawn photo decode workers, decoding inline: {}", e);
                None
            }
        };

        Self {
            settings,
            book,
            factory,
            decoder,
            event_bus: EventBus::new(),
            form: EntryForm::new(),
            cards: CardsView::new(),
            status_bar: StatusBar::new(),
            viewport: Viewport::new(INITIAL_VIEWPORT.0, INITIAL_VIEWPORT.1),
            show_settings: false,
            is_fullscreen: false,
            fullscreen_dirty: false,
            reset_settings_pending: false,
            applied_font: None,
        }
    }

    /// Push settings that the book and factory cache into them.
    pub fn apply_settings_to_core(&mut self) {
        self.book.set_window(self.settings.enlarge_window());
        self.book.set_policy(self.settings.enlarge_policy);
        self.factory.set_card_style(self.settings.card_style);
        self.factory
            .set_text_defaults(self.settings.text_defaults.clone());
        self.factory.set_date_format(self.settings.date_format.clone());
    }

    /// Submissions still waiting for their photo to decode.
    pub fn pending_decodes(&self) -> usize {
        self.decoder.as_ref().map_or(0, PhotoDecoder::in_flight)
    }

    /// Turn a form submission into an entry.
    ///
    /// Without a photo the entry is appended immediately. With one, the
    /// draft and the current viewport are captured now and the entry is
    /// appended once decoding finishes (see [`Self::finish_decodes`]).
    pub fn submit(&mut self, event: SubmitEntryEvent, now: f64) {
        let SubmitEntryEvent { draft, photo } = event;
        let Some(path) = photo else {
            self.append_entry(draft, None, self.viewport);
            return;
        };

        let ticket = DecodeTicket {
            draft,
            viewport: self.viewport,
            path,
        };
        let ticket = match &mut self.decoder {
            Some(decoder) => match decoder.submit(ticket) {
                Ok(()) => return,
                Err(ticket) => ticket,
            },
            None => ticket,
        };
        // No worker to take it, decode on this thread
        let photo = Photo::decode_file(&ticket.path);
        self.finish_decode(DecodeOutcome { ticket, photo }, now);
    }

    /// Append entries whose photos finished decoding since the last call.
    pub fn finish_decodes(&mut self, now: f64) {
        let Some(decoder) = &mut self.decoder else {
            return;
        };
        for outcome in decoder.poll() {
            self.finish_decode(outcome, now);
        }
    }

    fn finish_decode(&mut self, outcome: DecodeOutcome, now: f64) {
        let DecodeOutcome { ticket, photo } = outcome;
        let photo = match photo {
            Ok(photo) => Some(photo),
            Err(e) => {
                // Unreadable photo still leaves a text-only entry
                warn!("Photo {} unusable: {}", ticket.path.display(), e);
                self.status_bar
                    .set_message(format!("Photo could not be read: {}", e), now, NOTICE_SECS);
                None
            }
        };
        self.append_entry(ticket.draft, photo, ticket.viewport);
    }

    fn append_entry(&mut self, draft: EntryDraft, photo: Option<Photo>, viewport: Viewport) -> EntryId {
        let entry = self.factory.create(draft, photo, viewport);
        let id = entry.id();
        info!(
            "Entry {} added: {:?} ({})",
            id,
            entry.name(),
            if entry.photo().is_some() { "photo" } else { "text" }
        );
        self.book.append(entry);
        self.form.clear();
        id
    }

    /// Install or drop the custom font when the configured path changes.
    pub fn apply_font_if_changed(&mut self, ctx: &egui::Context, now: f64) {
        if self.settings.font_path == self.applied_font {
            return;
        }

        match &self.settings.font_path {
            Some(path) => {
                if let Err(e) = install_font(ctx, path) {
                    warn!("{:#}", e);
                    self.status_bar.set_message(format!("{:#}", e), now, NOTICE_SECS);
                }
            }
            None => ctx.set_fonts(egui::FontDefinitions::default()),
        }
        self.applied_font = self.settings.font_path.clone();
    }

    /// Reset all settings to defaults.
    pub fn reset_settings(&mut self) {
        info!("Resetting settings to default");
        self.settings = KioskSettings::default();
        self.apply_settings_to_core();
    }
}

/// Put the font file first in both families so it covers every glyph it has.
fn install_font(ctx: &egui::Context, path: &Path) -> Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read font {}", path.display()))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("kiosk".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, "kiosk".to_owned());
    }
    ctx.set_fonts(fonts);

    info!("Font loaded: {}", path.display());
    Ok(())
}
