//! Drifting cards - the render side of the entry book.
//!
//! Draws each entry as a card positioned by its [`Motion`], and turns taps
//! into [`EnlargeEntryEvent`]s. Everything kept here is render-only state:
//! when a card first appeared (its animation clock), how far it has been
//! dragged, and its uploaded photo texture. None of it feeds back into the
//! entries themselves.

use std::collections::HashMap;

use eframe::egui::{self, Color32, FontId, Pos2, Rect, Stroke, StrokeKind, Vec2};

use super::cards_events::EnlargeEntryEvent;
use crate::core::EventEmitter;
use crate::dialogs::prefs::{ImageDisplay, KioskSettings};
use crate::entities::{CardStyle, Entry, EntryId, Motion, MotionSample, Photo};

const CORNER_RADIUS: f32 = 8.0;
const CAPTION_HEIGHT: f32 = 18.0;
const SCALE_ANIM_SECS: f32 = 0.25;

const FRAME_BORDER: Color32 = Color32::from_gray(156);
const TEXT_DARK: Color32 = Color32::from_gray(55);
const TEXT_MUTED: Color32 = Color32::from_gray(110);

#[derive(Default)]
pub struct CardsView {
    spawned_at: HashMap<EntryId, f64>,
    drag_offsets: HashMap<EntryId, Vec2>,
    textures: HashMap<EntryId, egui::TextureHandle>,
}

impl CardsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds this card has been drifting.
    pub fn elapsed(&mut self, id: EntryId, now: f64) -> f64 {
        let spawned = *self.spawned_at.entry(id).or_insert(now);
        now - spawned
    }

    /// Accumulate a drag, keeping the card's vertical extent on screen.
    pub fn drag(&mut self, id: EntryId, delta: Vec2, base_y: f32, card_height: f32, viewport: Rect) {
        let offset = self.drag_offsets.entry(id).or_insert(Vec2::ZERO);
        *offset += delta;
        let max_y = (viewport.height() - card_height).max(0.0);
        offset.y = (base_y + offset.y).clamp(0.0, max_y) - base_y;
        offset.x = offset.x.clamp(-viewport.width(), viewport.width());
    }

    pub fn drag_offset(&self, id: EntryId) -> Vec2 {
        self.drag_offsets.get(&id).copied().unwrap_or(Vec2::ZERO)
    }

    /// Unscaled card box for this frame, sized by the entry's own style.
    pub fn card_rect(&mut self, entry: &Entry, viewport: Rect, now: f64) -> (Rect, MotionSample) {
        let elapsed = self.elapsed(entry.id(), now);
        let sample = Motion::for_entry(entry, viewport.width()).sample(elapsed);
        let style = entry.card_style();
        let base = viewport.min + Vec2::new(sample.x, sample.y) + self.drag_offset(entry.id());
        let rect = Rect::from_min_size(base, Vec2::new(style.box_width, style.box_height));
        (rect, sample)
    }

    /// Draw all entries inside the panel `ui` covers.
    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        entries: &[Entry],
        now: f64,
        settings: &KioskSettings,
        emitter: &EventEmitter,
    ) {
        let viewport = ui.max_rect();
        let ctx = ui.ctx().clone();
        let painter = ui.painter().with_clip_rect(viewport);

        // Enlarged cards last so they sit on top and win the hit test
        let (normal, enlarged): (Vec<&Entry>, Vec<&Entry>) =
            entries.iter().partition(|e| !e.enlarged());

        for entry in normal.into_iter().chain(enlarged) {
            let id = entry.id();
            let style = entry.card_style();
            let (unscaled, sample) = self.card_rect(entry, viewport, now);

            let target_scale = if entry.enlarged() {
                settings.enlarge_scale.max(1.0)
            } else {
                1.0
            };
            let scale = ctx.animate_value_with_time(
                egui::Id::new(("card_scale", id.get())),
                target_scale,
                SCALE_ANIM_SECS,
            );

            let rect = Rect::from_center_size(unscaled.center(), unscaled.size() * scale);

            if !rect.intersects(viewport) {
                continue;
            }

            let response = ui.interact(
                rect,
                egui::Id::new(("card", id.get())),
                egui::Sense::click_and_drag(),
            );
            if response.clicked() {
                emitter.emit(EnlargeEntryEvent(id));
            }
            if response.dragged() {
                self.drag(id, response.drag_delta(), sample.y, style.box_height, viewport);
            }

            let texture = self.texture_for(&ctx, entry);
            paint_card(
                &painter,
                rect,
                entry,
                texture.as_ref(),
                &style,
                settings.image_display,
                scale,
                sample.opacity,
            );
        }
    }

    /// Upload the entry's photo once; later frames reuse the handle.
    fn texture_for(&mut self, ctx: &egui::Context, entry: &Entry) -> Option<egui::TextureHandle> {
        let photo = entry.photo()?;
        let handle = self.textures.entry(entry.id()).or_insert_with(|| {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [photo.width() as usize, photo.height() as usize],
                photo.rgba(),
            );
            ctx.load_texture(
                format!("entry-photo-{}", entry.id().get()),
                image,
                egui::TextureOptions::LINEAR,
            )
        });
        Some(handle.clone())
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_card(
    painter: &egui::Painter,
    rect: Rect,
    entry: &Entry,
    texture: Option<&egui::TextureHandle>,
    style: &CardStyle,
    display: ImageDisplay,
    scale: f32,
    opacity: f32,
) {
    let fade = |c: Color32| c.gamma_multiply(opacity);
    let radius = CORNER_RADIUS * scale;

    if style.is_framed() {
        painter.rect_filled(rect, radius, fade(Color32::WHITE));
        painter.rect_stroke(rect, radius, Stroke::new(2.0, fade(FRAME_BORDER)), StrokeKind::Inside);
    }

    let pad = ((style.box_width - style.image_width) / 2.0).max(0.0) * scale;
    let caption_h = CAPTION_HEIGHT * scale;
    let inner = Rect::from_min_max(
        rect.min + Vec2::splat(pad),
        rect.max - Vec2::new(pad, caption_h),
    );

    match (texture.zip(entry.photo()), display) {
        (Some((texture, photo)), ImageDisplay::FallbackToText) => {
            paint_photo(painter, inner, texture, photo, style, scale, opacity);
        }
        (Some((texture, photo)), ImageDisplay::Always) => {
            let split_y = inner.center().y + inner.height() * 0.2;
            let photo_area = Rect::from_min_max(inner.min, Pos2::new(inner.max.x, split_y));
            let text_area = Rect::from_min_max(Pos2::new(inner.min.x, split_y), inner.max);
            paint_photo(painter, photo_area, texture, photo, style, scale, opacity);
            paint_text_block(painter, text_area, entry, scale, opacity);
        }
        (None, _) => paint_text_block(painter, inner, entry, scale, opacity),
    }

    // Caption strip along the bottom edge
    let strip = Rect::from_min_max(Pos2::new(rect.min.x, rect.max.y - caption_h), rect.max);
    painter.rect_filled(
        strip,
        egui::CornerRadius {
            nw: 0,
            ne: 0,
            sw: radius as u8,
            se: radius as u8,
        },
        Color32::from_black_alpha(128).gamma_multiply(opacity),
    );
    let caption = painter.layout_no_wrap(
        entry.caption(),
        FontId::proportional(10.0 * scale),
        fade(Color32::WHITE),
    );
    let caption_pos = Pos2::new(
        strip.center().x - caption.size().x.min(strip.width()) / 2.0,
        strip.center().y - caption.size().y / 2.0,
    );
    painter
        .with_clip_rect(strip.intersect(painter.clip_rect()))
        .galley(caption_pos, caption, fade(Color32::WHITE));
}

fn paint_photo(
    painter: &egui::Painter,
    area: Rect,
    texture: &egui::TextureHandle,
    photo: &Photo,
    style: &CardStyle,
    scale: f32,
    opacity: f32,
) {
    let max_w = area.width().min(style.image_width * scale);
    let max_h = area.height().min(style.image_height * scale);
    let (w, h) = photo.fit_within(max_w, max_h);
    let photo_rect = Rect::from_center_size(area.center(), Vec2::new(w, h));

    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    painter.image(texture.id(), photo_rect, uv, Color32::WHITE.gamma_multiply(opacity));
}

fn paint_text_block(painter: &egui::Painter, area: Rect, entry: &Entry, scale: f32, opacity: f32) {
    let wrap = area.width().max(1.0);
    let lines = [
        (entry.name(), 16.0_f32, TEXT_DARK),
        (entry.message(), 12.0_f32, TEXT_DARK),
        (entry.created_label(), 10.0_f32, TEXT_MUTED),
    ];
    let galleys: Vec<_> = lines
        .iter()
        .map(|&(text, size, color)| {
            painter.layout(
                text.to_string(),
                FontId::proportional(size * scale),
                color.gamma_multiply(opacity),
                wrap,
            )
        })
        .collect();

    let gap = 4.0 * scale;
    let total: f32 = galleys.iter().map(|g| g.size().y).sum::<f32>() + gap * 2.0;
    let mut y = area.center().y - total / 2.0;
    let clipped = painter.with_clip_rect(area.intersect(painter.clip_rect()));
    for galley in galleys {
        let x = area.center().x - galley.size().x / 2.0;
        let height = galley.size().y;
        clipped.galley(Pos2::new(x, y), galley, Color32::PLACEHOLDER);
        y += height + gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Direction, EntryDraft, EntryFactory, TextDefaults, Viewport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 600.0))
    }

    #[test]
    fn test_clock_starts_on_first_sight() {
        let mut view = CardsView::new();
        let id = EntryId::new(1);
        assert_eq!(view.elapsed(id, 50.0), 0.0);
        assert_eq!(view.elapsed(id, 57.5), 7.5);
        assert_eq!(view.elapsed(EntryId::new(2), 57.5), 0.0);
    }

    #[test]
    fn test_drag_accumulates() {
        let mut view = CardsView::new();
        let id = EntryId::new(1);
        view.drag(id, Vec2::new(10.0, 5.0), 100.0, 225.0, viewport());
        view.drag(id, Vec2::new(-4.0, 5.0), 100.0, 225.0, viewport());
        assert_eq!(view.drag_offset(id), Vec2::new(6.0, 10.0));
        assert_eq!(view.drag_offset(EntryId::new(2)), Vec2::ZERO);
    }

    #[test]
    fn test_drag_clamps_to_viewport_height() {
        let mut view = CardsView::new();
        let id = EntryId::new(1);
        view.drag(id, Vec2::new(0.0, -500.0), 100.0, 225.0, viewport());
        assert_eq!(view.drag_offset(id).y, -100.0);
        view.drag(id, Vec2::new(0.0, 5_000.0), 100.0, 225.0, viewport());
        assert_eq!(view.drag_offset(id).y, 600.0 - 225.0 - 100.0);
    }

    #[test]
    fn test_card_box_follows_entry_not_current_style() {
        let mut factory = EntryFactory::with_rng(
            StdRng::seed_from_u64(21),
            CardStyle::photo_only(),
            TextDefaults::default(),
            "%Y",
        );
        let entry = factory.create(EntryDraft::default(), None, Viewport::new(1000.0, 600.0));
        // Switching the style afterwards must not resize cards already placed
        factory.set_card_style(CardStyle::framed());

        let mut view = CardsView::new();
        let (rect, sample) = view.card_rect(&entry, viewport(), 0.0);
        let photo_only = CardStyle::photo_only();
        assert_eq!(rect.size(), Vec2::new(photo_only.box_width, photo_only.box_height));
        assert_eq!(rect.min.y, entry.vertical_position());
        assert_eq!(sample.y, entry.vertical_position());
        assert!(rect.max.y <= viewport().max.y);

        let expected_x = match entry.direction() {
            Direction::Leftward => 1000.0 + photo_only.box_width,
            Direction::Rightward => -photo_only.box_width * 2.0,
        };
        assert_eq!(rect.min.x, expected_x);
    }
}
