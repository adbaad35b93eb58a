use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::core::EnlargePolicy;
use crate::dialogs::prefs::{ImageDisplay, KioskSettings, PhotoSource};

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Every tap arms its own shrink timer
    Independent,
    /// A tap restarts the enlarge window
    Extend,
}

impl From<PolicyArg> for EnlargePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Independent => EnlargePolicy::Independent,
            PolicyArg::Extend => EnlargePolicy::Extend,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PhotoSourceArg {
    Camera,
    CameraAndUpload,
}

impl From<PhotoSourceArg> for PhotoSource {
    fn from(arg: PhotoSourceArg) -> Self {
        match arg {
            PhotoSourceArg::Camera => PhotoSource::CameraOnly,
            PhotoSourceArg::CameraAndUpload => PhotoSource::CameraAndUpload,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageDisplayArg {
    /// Photo and text on every card
    Always,
    /// Text only on cards without a photo
    Fallback,
}

impl From<ImageDisplayArg> for ImageDisplay {
    fn from(arg: ImageDisplayArg) -> Self {
        match arg {
            ImageDisplayArg::Always => ImageDisplay::Always,
            ImageDisplayArg::Fallback => ImageDisplay::FallbackToText,
        }
    }
}

/// Drifting photo guestbook kiosk
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Start in fullscreen kiosk mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// TTF/OTF font to use for all text (needed for Hangul/CJK names)
    #[arg(long = "font", value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// What a second tap on an enlarged card does
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Seconds a tapped card stays enlarged
    #[arg(long = "enlarge-secs", value_name = "SECS")]
    pub enlarge_secs: Option<f32>,

    /// Photo buttons offered by the form
    #[arg(long = "photo-source", value_enum)]
    pub photo_source: Option<PhotoSourceArg>,

    /// Whether cards with a photo also show the text block
    #[arg(long = "image-display", value_enum)]
    pub image_display: Option<ImageDisplayArg>,

    /// Photo decode threads
    #[arg(long = "decode-workers", value_name = "N")]
    pub decode_workers: Option<u32>,

    /// Enable debug logging to file (default: guestbook.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// Overlay explicitly given flags on top of persisted settings.
    pub fn apply_to(&self, settings: &mut KioskSettings) {
        if let Some(font) = &self.font {
            settings.font_path = Some(font.clone());
        }
        if let Some(policy) = self.policy {
            settings.enlarge_policy = policy.into();
        }
        if let Some(secs) = self.enlarge_secs {
            settings.enlarge_secs = secs;
        }
        if let Some(source) = self.photo_source {
            settings.photo_source = source.into();
        }
        if let Some(display) = self.image_display {
            settings.image_display = display.into();
        }
        if let Some(workers) = self.decode_workers {
            settings.decode_workers = workers.max(1);
        }
    }
}
