//! CPU rasterization of marker glyphs
//!
//! Glyphs are burned directly into RGBA buffers with supersampled coverage,
//! so the on-screen preview and the exported image come from the same
//! rasterizer.

use image::{Rgba, RgbaImage};

use crate::config::MarkerShape;

/// Supersampling grid per pixel (SAMPLES x SAMPLES).
const SAMPLES: i32 = 4;

/// Arrowhead angle from the shaft, in radians (35 degrees).
const HEAD_ANGLE: f32 = 0.610_865_2;

/// Draw one marker glyph centered at (`cx`, `cy`) with half-extent `half`,
/// all in pixel coordinates of `img`. Pixels outside the image are skipped.
pub fn draw_glyph(
    img: &mut RgbaImage,
    shape: MarkerShape,
    cx: f32,
    cy: f32,
    half: f32,
    color: Rgba<u8>,
) {
    let stroke = (half * 0.35).max(1.0);
    match shape {
        MarkerShape::Circle => fill_circle(img, cx, cy, half, color),
        MarkerShape::Square => fill_covered(
            img,
            (cx - half, cy - half, cx + half, cy + half),
            color,
            |x, y| (x - cx).abs() <= half && (y - cy).abs() <= half,
        ),
        MarkerShape::Cross => {
            fill_capsule(img, cx - half, cy - half, cx + half, cy + half, stroke, color);
            fill_capsule(img, cx - half, cy + half, cx + half, cy - half, stroke, color);
        }
        MarkerShape::Triangle => fill_triangle(
            img,
            (cx, cy - half),
            (cx - half, cy + half),
            (cx + half, cy + half),
            color,
        ),
        MarkerShape::UpArrow => draw_arrow(img, cx, cy + half, cx, cy - half, stroke, half, color),
        MarkerShape::RightArrow => draw_arrow(img, cx - half, cy, cx + half, cy, stroke, half, color),
        MarkerShape::DownArrow => draw_arrow(img, cx, cy - half, cx, cy + half, stroke, half, color),
        MarkerShape::LeftArrow => draw_arrow(img, cx + half, cy, cx - half, cy, stroke, half, color),
    }
}

/// Shaft plus two angled head lines, tip at (`x1`, `y1`).
#[allow(clippy::too_many_arguments)]
fn draw_arrow(
    img: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: f32,
    head_size: f32,
    color: Rgba<u8>,
) {
    fill_capsule(img, x0, y0, x1, y1, thickness, color);
    if let Some((h1x, h1y, h2x, h2y)) = head_points(x0, y0, x1, y1, head_size) {
        fill_capsule(img, x1, y1, h1x, h1y, thickness, color);
        fill_capsule(img, x1, y1, h2x, h2y, thickness, color);
    }
}

/// Endpoints of the two arrowhead lines for a shaft from start to end.
fn head_points(
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    head_size: f32,
) -> Option<(f32, f32, f32, f32)> {
    let dx = end_x - start_x;
    let dy = end_y - start_y;
    let length = (dx * dx + dy * dy).sqrt();
    if length < 1e-3 {
        return None;
    }
    let nx = dx / length;
    let ny = dy / length;

    let cos_a = HEAD_ANGLE.cos();
    let sin_a = HEAD_ANGLE.sin();

    // Back-pointing direction rotated by +/- the head angle
    let h1x = end_x + (-nx * cos_a + ny * sin_a) * head_size;
    let h1y = end_y + (-nx * sin_a - ny * cos_a) * head_size;
    let h2x = end_x + (-nx * cos_a - ny * sin_a) * head_size;
    let h2y = end_y + (nx * sin_a - ny * cos_a) * head_size;
    Some((h1x, h1y, h2x, h2y))
}

fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let r2 = radius * radius;
    fill_covered(
        img,
        (cx - radius, cy - radius, cx + radius, cy + radius),
        color,
        |x, y| {
            let dx = x - cx;
            let dy = y - cy;
            dx * dx + dy * dy <= r2
        },
    );
}

/// Thick line with rounded caps, as the set of points within
/// `thickness / 2` of the segment.
fn fill_capsule(
    img: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: f32,
    color: Rgba<u8>,
) {
    let r = thickness / 2.0;
    let r2 = r * r;
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len2 = dx * dx + dy * dy;
    let bounds = (
        x0.min(x1) - r,
        y0.min(y1) - r,
        x0.max(x1) + r,
        y0.max(y1) + r,
    );
    fill_covered(img, bounds, color, |x, y| {
        let t = if len2 > 0.0 {
            (((x - x0) * dx + (y - y0) * dy) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let px = x0 + t * dx;
        let py = y0 + t * dy;
        (x - px) * (x - px) + (y - py) * (y - py) <= r2
    });
}

fn fill_triangle(
    img: &mut RgbaImage,
    (x0, y0): (f32, f32),
    (x1, y1): (f32, f32),
    (x2, y2): (f32, f32),
    color: Rgba<u8>,
) {
    // Signed area (2x); degenerate triangles draw nothing
    let area = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0);
    if area.abs() < 1e-3 {
        return;
    }
    let bounds = (
        x0.min(x1).min(x2),
        y0.min(y1).min(y2),
        x0.max(x1).max(x2),
        y0.max(y1).max(y2),
    );
    fill_covered(img, bounds, color, |x, y| {
        let e0 = (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0);
        let e1 = (x2 - x1) * (y - y1) - (y2 - y1) * (x - x1);
        let e2 = (x0 - x2) * (y - y2) - (y0 - y2) * (x - x2);
        if area > 0.0 {
            e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0
        } else {
            e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0
        }
    });
}

/// Rasterize the region where `inside` holds, restricted to `bounds`
/// (min_x, min_y, max_x, max_y), with supersampled edge coverage.
fn fill_covered(
    img: &mut RgbaImage,
    bounds: (f32, f32, f32, f32),
    color: Rgba<u8>,
    inside: impl Fn(f32, f32) -> bool,
) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let min_x = (bounds.0.floor() as i32).max(0);
    let min_y = (bounds.1.floor() as i32).max(0);
    let max_x = (bounds.2.ceil() as i32).min(w - 1);
    let max_y = (bounds.3.ceil() as i32).min(h - 1);

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let mut covered = 0;
            for sy in 0..SAMPLES {
                for sx in 0..SAMPLES {
                    let x = px as f32 + (sx as f32 + 0.5) / SAMPLES as f32;
                    let y = py as f32 + (sy as f32 + 0.5) / SAMPLES as f32;
                    if inside(x, y) {
                        covered += 1;
                    }
                }
            }
            if covered > 0 {
                let coverage = covered as f32 / (SAMPLES * SAMPLES) as f32;
                blend_pixel(img, px as u32, py as u32, color, coverage);
            }
        }
    }
}

/// Straight-alpha over compositing. The flattened output keeps
/// transparency outside the background, so the destination alpha cannot be
/// assumed opaque.
fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, coverage: f32) {
    let src_a = coverage * color.0[3] as f32 / 255.0;
    if src_a >= 0.999 {
        img.put_pixel(x, y, color);
        return;
    }
    if src_a <= 0.0 {
        return;
    }
    let dst = *img.get_pixel(x, y);
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |s: u8, d: u8| {
        ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a).round() as u8
    };
    img.put_pixel(
        x,
        y,
        Rgba([
            blend(color.0[0], dst.0[0]),
            blend(color.0[1], dst.0[1]),
            blend(color.0[2], dst.0[2]),
            (out_a * 255.0).round() as u8,
        ]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_every_shape_marks_pixels() {
        for shape in MarkerShape::ALL {
            let mut img = canvas();
            draw_glyph(&mut img, shape, 32.0, 32.0, 12.0, RED);
            let painted = img.pixels().filter(|p| p.0 != [255, 255, 255, 255]).count();
            assert!(painted > 0, "{shape:?} drew nothing");
        }
    }

    #[test]
    fn test_circle_center_is_solid() {
        let mut img = canvas();
        draw_glyph(&mut img, MarkerShape::Circle, 32.0, 32.0, 12.0, RED);
        assert_eq!(*img.get_pixel(32, 32), RED);
        // Well outside the radius stays untouched
        assert_eq!(*img.get_pixel(32, 10), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_square_fills_extent() {
        let mut img = canvas();
        draw_glyph(&mut img, MarkerShape::Square, 32.0, 32.0, 10.0, RED);
        assert_eq!(*img.get_pixel(25, 25), RED);
        assert_eq!(*img.get_pixel(39, 39), RED);
        assert_eq!(*img.get_pixel(45, 32), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_glyph_clipped_at_image_edge() {
        let mut img = canvas();
        // Centers outside or on the border must not panic
        draw_glyph(&mut img, MarkerShape::Circle, 0.0, 0.0, 12.0, RED);
        draw_glyph(&mut img, MarkerShape::Cross, 63.0, 63.0, 12.0, RED);
        draw_glyph(&mut img, MarkerShape::UpArrow, -20.0, -20.0, 12.0, RED);
        assert_eq!(*img.get_pixel(0, 0), RED);
    }

    #[test]
    fn test_blend_over_transparent_keeps_color() {
        let mut img = RgbaImage::new(8, 8);
        blend_pixel(&mut img, 4, 4, RED, 0.5);
        let p = *img.get_pixel(4, 4);
        assert_eq!(p.0[0], 255);
        assert_eq!(p.0[3], 128);
    }
}
