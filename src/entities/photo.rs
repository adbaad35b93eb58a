//! Decoded visitor photo.
//!
//! Photos are decoded once (off the UI thread, see
//! [`PhotoDecoder`](crate::core::PhotoDecoder)) into straight RGBA8 and
//! shrunk so the longest side fits [`MAX_PHOTO_SIDE`]. Cards are small, so
//! keeping full camera resolution around would only waste memory.

use std::path::Path;
use std::sync::Arc;

use log::debug;

/// Longest side kept after decode, in pixels.
pub const MAX_PHOTO_SIDE: u32 = 512;

/// Image file extensions offered by the photo picker.
pub const PHOTO_EXTS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

#[derive(Debug)]
pub enum PhotoError {
    Io(String),
    Decode(String),
    Empty,
}

impl std::fmt::Display for PhotoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoError::Io(e) => write!(f, "Photo read error: {}", e),
            PhotoError::Decode(e) => write!(f, "Photo decode error: {}", e),
            PhotoError::Empty => write!(f, "Photo has no pixels"),
        }
    }
}

impl std::error::Error for PhotoError {}

/// RGBA8 pixels, shared cheaply between entry snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    width: u32,
    height: u32,
    rgba: Arc<[u8]>,
}

impl Photo {
    /// Wrap already-decoded RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, PhotoError> {
        if width == 0 || height == 0 {
            return Err(PhotoError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(PhotoError::Decode(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into(),
        })
    }

    /// Read and decode an image file (format sniffed from content).
    pub fn decode_file(path: &Path) -> Result<Self, PhotoError> {
        debug!("Decoding photo: {}", path.display());
        let bytes = std::fs::read(path)
            .map_err(|e| PhotoError::Io(format!("{}: {}", path.display(), e)))?;
        Self::decode_bytes(&bytes)
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...).
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, PhotoError> {
        if bytes.is_empty() {
            return Err(PhotoError::Empty);
        }
        let mut img =
            image::load_from_memory(bytes).map_err(|e| PhotoError::Decode(e.to_string()))?;

        if img.width() > MAX_PHOTO_SIDE || img.height() > MAX_PHOTO_SIDE {
            img = img.thumbnail(MAX_PHOTO_SIDE, MAX_PHOTO_SIDE);
        }

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Largest size with this photo's aspect ratio that fits in `max_w` x `max_h`.
    pub fn fit_within(&self, max_w: f32, max_h: f32) -> (f32, f32) {
        let scale = (max_w / self.width as f32).min(max_h / self.height as f32);
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}
