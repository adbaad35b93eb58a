pub mod prefs;
pub mod prefs_events;

pub use prefs::{ImageDisplay, KioskSettings, PhotoSource, render_settings_window};
