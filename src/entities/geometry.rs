//! Screen and card dimensions shared by placement and motion.

/// Size of the drawable area cards drift across, in logical points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<eframe::egui::Rect> for Viewport {
    fn from(rect: eframe::egui::Rect) -> Self {
        Self::new(rect.width(), rect.height())
    }
}

/// Card sizing.
///
/// The outer box is what placement and motion reason about; the photo is
/// fitted inside it with padding. `photo_only()` drops the frame so the box
/// is the photo itself.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardStyle {
    pub box_width: f32,
    pub box_height: f32,
    pub image_width: f32,
    pub image_height: f32,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self::framed()
    }
}

impl CardStyle {
    /// 4x6cm white frame around a 3.5x4.5cm photo (at ~37.8 px/cm).
    pub fn framed() -> Self {
        Self {
            box_width: 150.0,
            box_height: 225.0,
            image_width: 132.0,
            image_height: 170.0,
        }
    }

    /// Bare photo, no frame.
    pub fn photo_only() -> Self {
        Self {
            box_width: 132.0,
            box_height: 170.0,
            image_width: 132.0,
            image_height: 170.0,
        }
    }

    pub fn is_framed(&self) -> bool {
        self.box_width > self.image_width || self.box_height > self.image_height
    }
}
