//! Compositing the background map and the marker overlay
//!
//! Two entry points share one rasterizer: [`draw_all`] paints the current
//! view, [`flatten`] produces the exportable buffer. The glyph size is
//! fixed in view pixels, so symbols stay legible at any zoom; [`flatten`]
//! converts that size back to scene units so its output matches what the
//! view shows.

pub mod glyph;

use image::{Rgba, RgbaImage, imageops};

use crate::config::MapConfig;
use crate::domain::{MarkerStore, SceneRect};
use crate::view::ViewTransform;

use glyph::draw_glyph;

/// Draw the background and every marker, in store order, into a view-sized
/// surface.
pub fn draw_all(
    surface: &mut RgbaImage,
    background: &RgbaImage,
    store: &MarkerStore,
    transform: &ViewTransform,
    config: &MapConfig,
) {
    let scale = transform.scale();
    let (offset_x, offset_y) = transform.offset();
    let scaled_w = (background.width() as f32 * scale).round().max(1.0) as u32;
    let scaled_h = (background.height() as f32 * scale).round().max(1.0) as u32;
    if (scaled_w, scaled_h) == background.dimensions() {
        imageops::overlay(
            surface,
            background,
            offset_x.round() as i64,
            offset_y.round() as i64,
        );
    } else {
        let resized =
            imageops::resize(background, scaled_w, scaled_h, imageops::FilterType::Lanczos3);
        imageops::overlay(
            surface,
            &resized,
            offset_x.round() as i64,
            offset_y.round() as i64,
        );
    }

    let half = config.glyph_size / 2.0;
    for marker in store.markers() {
        let v = transform.to_view(marker.position);
        draw_glyph(
            surface,
            marker.shape,
            v.x,
            v.y,
            half,
            Rgba(marker.color.to_rgba_u8()),
        );
    }
}

/// Scene-space bounding box of the background plus every marker's glyph
/// extent at the current transform.
pub fn content_bounds(
    background: &RgbaImage,
    store: &MarkerStore,
    transform: &ViewTransform,
    config: &MapConfig,
) -> SceneRect {
    let half = transform.scene_length(config.glyph_size / 2.0);
    let mut bounds = SceneRect::from_size(background.width() as f32, background.height() as f32);
    for marker in store.markers() {
        bounds = bounds.union(SceneRect::around(marker.position, half));
    }
    bounds
}

/// Flatten the background and all markers into a transparent buffer
/// cropped to [`content_bounds`], at native scene resolution, using the
/// same draw order and rasterizer as [`draw_all`].
pub fn flatten(
    background: &RgbaImage,
    store: &MarkerStore,
    transform: &ViewTransform,
    config: &MapConfig,
) -> RgbaImage {
    let bounds = content_bounds(background, store, transform, config);
    let width = bounds.width().ceil().max(1.0) as u32;
    let height = bounds.height().ceil().max(1.0) as u32;
    let mut out = RgbaImage::new(width, height);

    imageops::overlay(
        &mut out,
        background,
        (-bounds.left).round() as i64,
        (-bounds.top).round() as i64,
    );

    let half = transform.scene_length(config.glyph_size / 2.0);
    for marker in store.markers() {
        draw_glyph(
            &mut out,
            marker.shape,
            marker.position.x - bounds.left,
            marker.position.y - bounds.top,
            half,
            Rgba(marker.color.to_rgba_u8()),
        );
    }

    log::debug!(
        "flattened map: {}x{} pixels, {} markers",
        width,
        height,
        store.len()
    );
    out
}
