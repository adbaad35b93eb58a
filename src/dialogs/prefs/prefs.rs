use std::fmt::Write as _;

use eframe::egui;

use crate::core::EnlargePolicy;
use crate::entities::factory::DEFAULT_DATE_FORMAT;
use crate::entities::{CardStyle, TextDefaults};

/// Settings categories
#[derive(Debug, Clone, Copy, PartialEq)]
enum SettingsCategory {
    General,
    Cards,
    Input,
    UI,
}

impl SettingsCategory {
    const ALL: [SettingsCategory; 4] = [
        SettingsCategory::General,
        SettingsCategory::Cards,
        SettingsCategory::Input,
        SettingsCategory::UI,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SettingsCategory::General => "General",
            SettingsCategory::Cards => "Cards",
            SettingsCategory::Input => "Input",
            SettingsCategory::UI => "UI",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Which photo buttons the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PhotoSource {
    /// "Take Photo" only
    CameraOnly,
    /// "Take Photo" and "Upload Photo"
    #[default]
    CameraAndUpload,
}

/// What a card shows when the entry has a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ImageDisplay {
    /// Photo plus the name/message/date block under it
    Always,
    /// Photo alone; the text block only appears on cards without one
    #[default]
    FallbackToText,
}

/// Kiosk settings (persisted via eframe storage; entries never are)
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct KioskSettings {
    // Entries
    pub text_defaults: TextDefaults,
    pub date_format: String,

    // Cards
    pub card_style: CardStyle,
    pub image_display: ImageDisplay,
    pub enlarge_secs: f32,
    pub enlarge_scale: f32,
    pub enlarge_policy: EnlargePolicy,

    // Input
    pub photo_source: PhotoSource,
    pub decode_workers: u32, // applies on restart

    // UI
    pub dark_mode: bool,
    pub font_size: f32,
    pub font_path: Option<std::path::PathBuf>,
    pub show_status_bar: bool,

    // Internal
    pub selected_settings_category: Option<String>,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            text_defaults: TextDefaults::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            card_style: CardStyle::framed(),
            image_display: ImageDisplay::default(),
            enlarge_secs: 10.0,
            enlarge_scale: 1.8,
            enlarge_policy: EnlargePolicy::default(),
            photo_source: PhotoSource::default(),
            decode_workers: 2,
            dark_mode: false,
            font_size: 14.0,
            font_path: None,
            show_status_bar: true,
            selected_settings_category: Some("Cards".to_string()),
        }
    }
}

impl KioskSettings {
    /// Enlarge window, clamped to something a visitor can actually see.
    pub fn enlarge_window(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(self.enlarge_secs.clamp(0.5, 600.0))
    }
}

/// Render General settings category
fn render_general_settings(ui: &mut egui::Ui, settings: &mut KioskSettings) {
    ui.heading("Placeholders");
    ui.add_space(8.0);

    ui.label("Name when left blank:");
    ui.text_edit_singleline(&mut settings.text_defaults.name);
    ui.add_space(4.0);
    ui.label("Message when left blank:");
    ui.text_edit_singleline(&mut settings.text_defaults.message);

    ui.add_space(16.0);
    ui.heading("Date");
    ui.add_space(8.0);
    ui.label("Date label format (strftime):");
    ui.text_edit_singleline(&mut settings.date_format);
    let mut preview = String::new();
    if write!(preview, "{}", chrono::Local::now().format(&settings.date_format)).is_err() {
        preview = "(invalid format)".to_string();
    }
    ui.label(format!("Today: {}", preview));
    ui.label("Invalid formats fall back to month/day/year.");
}

/// Render Cards settings category
fn render_card_settings(ui: &mut egui::Ui, settings: &mut KioskSettings) {
    ui.heading("Card Style");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.radio_value(&mut settings.card_style, CardStyle::framed(), "Framed");
        ui.radio_value(&mut settings.card_style, CardStyle::photo_only(), "Photo only");
    });
    ui.label("Applies to new entries; existing cards keep their size and path.");

    ui.add_space(8.0);
    ui.label("Cards with a photo show:");
    ui.horizontal(|ui| {
        ui.radio_value(&mut settings.image_display, ImageDisplay::FallbackToText, "Photo only");
        ui.radio_value(&mut settings.image_display, ImageDisplay::Always, "Photo and text");
    });

    ui.add_space(16.0);
    ui.heading("Enlarge");
    ui.add_space(8.0);

    ui.label("Enlarge Duration:");
    ui.add(
        egui::Slider::new(&mut settings.enlarge_secs, 1.0..=60.0)
            .suffix(" s")
            .step_by(0.5),
    );
    ui.label("Enlarge Scale:");
    ui.add(
        egui::Slider::new(&mut settings.enlarge_scale, 1.0..=3.0)
            .suffix("x")
            .step_by(0.1),
    );

    ui.add_space(8.0);
    ui.label("Tapping an enlarged card again:");
    ui.radio_value(
        &mut settings.enlarge_policy,
        EnlargePolicy::Independent,
        "Adds another timer (first one still shrinks it)",
    );
    ui.radio_value(
        &mut settings.enlarge_policy,
        EnlargePolicy::Extend,
        "Restarts the enlarge window",
    );
}

/// Render Input settings category
fn render_input_settings(ui: &mut egui::Ui, settings: &mut KioskSettings) {
    ui.heading("Photo Buttons");
    ui.add_space(8.0);

    ui.radio_value(&mut settings.photo_source, PhotoSource::CameraAndUpload, "Take Photo + Upload Photo");
    ui.radio_value(&mut settings.photo_source, PhotoSource::CameraOnly, "Take Photo only");

    ui.add_space(16.0);
    ui.heading("Performance");
    ui.add_space(8.0);

    ui.label("Photo Decode Threads:");
    ui.add(
        egui::DragValue::new(&mut settings.decode_workers)
            .speed(1.0)
            .range(1..=16),
    );
    ui.label("Takes effect on next launch.");
}

/// Render UI settings category
fn render_ui_settings(ui: &mut egui::Ui, settings: &mut KioskSettings) {
    ui.heading("Appearance");
    ui.add_space(8.0);

    ui.label("Font Size:");
    ui.add(
        egui::Slider::new(&mut settings.font_size, 10.0..=24.0)
            .suffix(" px")
            .step_by(0.5),
    );
    ui.add_space(8.0);

    ui.checkbox(&mut settings.dark_mode, "Dark Mode");
    ui.checkbox(&mut settings.show_status_bar, "Show Status Bar (F2)");

    ui.add_space(8.0);
    match &settings.font_path {
        Some(path) => ui.label(format!("Font: {}", path.display())),
        None => ui.label("Font: built-in (use --font for Hangul/CJK text)"),
    };
}

/// Render settings window
pub fn render_settings_window(
    ctx: &egui::Context,
    show_settings: &mut bool,
    settings: &mut KioskSettings,
    mut on_reset: impl FnMut(),
) {
    let mut selected = settings
        .selected_settings_category
        .as_deref()
        .and_then(SettingsCategory::from_str)
        .unwrap_or(SettingsCategory::Cards);

    egui::Window::new("Settings")
        .id(egui::Id::new("settings_window"))
        .open(show_settings)
        .default_size([560.0, 420.0])
        .min_size([420.0, 320.0])
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Left panel: category list
                ui.vertical(|ui| {
                    ui.set_width(120.0);
                    ui.add_space(4.0);
                    for category in SettingsCategory::ALL {
                        ui.selectable_value(&mut selected, category, category.as_str());
                    }
                    ui.add_space(16.0);
                    if ui.button("Reset to Defaults").clicked() {
                        on_reset();
                    }
                });

                ui.separator();

                // Right panel: content for selected category
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        match selected {
                            SettingsCategory::General => render_general_settings(ui, settings),
                            SettingsCategory::Cards => render_card_settings(ui, settings),
                            SettingsCategory::Input => render_input_settings(ui, settings),
                            SettingsCategory::UI => render_ui_settings(ui, settings),
                        }
                    });
            });
        });

    settings.selected_settings_category = Some(selected.as_str().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_json_roundtrip_with_missing_fields() {
        // Older/partial files fill the gaps from defaults
        let parsed: KioskSettings =
            serde_json::from_str(r#"{"enlarge_secs": 4.0, "enlarge_policy": "Extend"}"#).unwrap();
        assert_eq!(parsed.enlarge_secs, 4.0);
        assert_eq!(parsed.enlarge_policy, EnlargePolicy::Extend);
        assert_eq!(parsed.card_style, CardStyle::framed());
        assert_eq!(parsed.text_defaults, TextDefaults::default());
    }

    #[test]
    fn test_enlarge_window_clamped() {
        let mut settings = KioskSettings::default();
        assert_eq!(settings.enlarge_window().as_secs_f32(), 10.0);
        settings.enlarge_secs = -5.0;
        assert_eq!(settings.enlarge_window().as_secs_f32(), 0.5);
    }

    #[test]
    fn test_category_names_roundtrip() {
        for category in SettingsCategory::ALL {
            assert_eq!(SettingsCategory::from_str(category.as_str()), Some(category));
        }
        assert_eq!(SettingsCategory::from_str("Gizmo"), None);
    }
}
