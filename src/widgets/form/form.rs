//! Entry form - name, message and the photo buttons.
//!
//! Floats centred above the drifting cards. Submitting never touches the
//! entry book directly: the form emits a [`SubmitEntryEvent`] and the app
//! clears the fields once the entry lands.

use eframe::egui::{self, Color32, RichText};
use log::debug;

use super::form_events::SubmitEntryEvent;
use crate::core::EventEmitter;
use crate::dialogs::prefs::PhotoSource;
use crate::entities::EntryDraft;
use crate::widgets::file_dialogs::create_photo_dialog;

const FORM_WIDTH: f32 = 320.0;
const BUTTON_HEIGHT: f32 = 34.0;

const CAMERA_GREEN: Color32 = Color32::from_rgb(34, 197, 94);
const UPLOAD_BLUE: Color32 = Color32::from_rgb(59, 130, 246);
const PLAIN_GRAY: Color32 = Color32::from_rgb(107, 114, 128);

#[derive(Debug, Default)]
pub struct EntryForm {
    pub name: String,
    pub message: String,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field contents, untouched.
    pub fn draft(&self) -> EntryDraft {
        EntryDraft::new(self.name.clone(), self.message.clone())
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.message.clear();
    }

    /// Render the form window. `pending` is the number of photos still decoding.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        photo_source: PhotoSource,
        pending: usize,
        emitter: &EventEmitter,
    ) {
        egui::Window::new("Guestbook")
            .id(egui::Id::new("entry_form"))
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .default_width(FORM_WIDTH)
            .show(ctx, |ui| {
                ui.set_width(FORM_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.add_space(6.0);
                    ui.heading("Leave a message");
                    ui.add_space(10.0);

                    ui.add(
                        egui::TextEdit::singleline(&mut self.name)
                            .hint_text("Name")
                            .desired_width(f32::INFINITY),
                    );
                    ui.add_space(4.0);
                    ui.add(
                        egui::TextEdit::singleline(&mut self.message)
                            .hint_text("Message")
                            .desired_width(f32::INFINITY),
                    );
                    ui.add_space(12.0);

                    let buttons = match photo_source {
                        PhotoSource::CameraOnly => 1.0,
                        PhotoSource::CameraAndUpload => 2.0,
                    };
                    let spacing = ui.spacing().item_spacing.x;
                    let button_width = (FORM_WIDTH - spacing * (buttons - 1.0)) / buttons;

                    ui.horizontal(|ui| {
                        if colored_button(ui, "Take Photo", CAMERA_GREEN, button_width).clicked() {
                            self.pick_and_submit("Take Photo", emitter);
                        }
                        if photo_source == PhotoSource::CameraAndUpload
                            && colored_button(ui, "Upload Photo", UPLOAD_BLUE, button_width).clicked()
                        {
                            self.pick_and_submit("Upload Photo", emitter);
                        }
                    });
                    ui.add_space(4.0);
                    if colored_button(ui, "Register Without Photo", PLAIN_GRAY, FORM_WIDTH).clicked() {
                        debug!("Form: submit without photo");
                        emitter.emit(SubmitEntryEvent {
                            draft: self.draft(),
                            photo: None,
                        });
                    }

                    if pending > 0 {
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(format!("Developing {} photo(s)...", pending));
                        });
                    }
                    ui.add_space(4.0);
                });
            });
    }

    /// Open the picker; a cancelled picker submits nothing.
    fn pick_and_submit(&self, title: &str, emitter: &EventEmitter) {
        match create_photo_dialog(title).pick_file() {
            Some(path) => {
                debug!("Form: picked photo {}", path.display());
                emitter.emit(SubmitEntryEvent::with_photo(self.draft(), path));
            }
            None => debug!("Form: photo picker cancelled"),
        }
    }
}

fn colored_button(ui: &mut egui::Ui, label: &str, fill: Color32, width: f32) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(label).color(Color32::WHITE).strong())
            .fill(fill)
            .corner_radius(8.0)
            .min_size(egui::vec2(width, BUTTON_HEIGHT)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_copies_fields_verbatim() {
        let form = EntryForm {
            name: " Jin".to_string(),
            message: "Congrats! ".to_string(),
        };
        assert_eq!(form.draft(), EntryDraft::new(" Jin", "Congrats! "));
    }

    #[test]
    fn test_clear_empties_fields() {
        let mut form = EntryForm {
            name: "Jin".to_string(),
            message: "hi".to_string(),
        };
        form.clear();
        assert!(form.name.is_empty() && form.message.is_empty());
    }
}
