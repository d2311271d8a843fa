//! Mapping between scene space and view space
//!
//! The transform is a uniform scale plus translation, derived from fitting
//! the background into the view while preserving its aspect ratio and
//! centering it. Forward and inverse mappings are exact inverses of each
//! other up to floating-point rounding.

use crate::domain::geometry::{ScenePoint, ViewPoint};

/// Affine scene-to-view transform (uniform scale + offset).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Fit a scene of `scene_w` x `scene_h` into a view of `view_w` x
    /// `view_h`: largest uniform scale that shows the whole scene,
    /// letterboxed and centered.
    ///
    /// Degenerate sizes (zero or negative) fall back to the identity
    /// transform rather than producing a non-invertible mapping.
    pub fn fit(scene_w: f32, scene_h: f32, view_w: f32, view_h: f32) -> Self {
        if scene_w <= 0.0 || scene_h <= 0.0 || view_w <= 0.0 || view_h <= 0.0 {
            return Self::identity();
        }
        let scale = (view_w / scene_w).min(view_h / scene_h);
        Self {
            scale,
            offset_x: (view_w - scene_w * scale) / 2.0,
            offset_y: (view_h - scene_h * scale) / 2.0,
        }
    }

    /// Pixels per scene unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// View-space position of the scene origin.
    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    /// Forward transform, used for drawing and on-screen hit boxes.
    pub fn to_view(&self, p: ScenePoint) -> ViewPoint {
        ViewPoint::new(p.x * self.scale + self.offset_x, p.y * self.scale + self.offset_y)
    }

    /// Inverse transform for pointer coordinates.
    pub fn to_scene(&self, p: ViewPoint) -> ScenePoint {
        ScenePoint::new((p.x - self.offset_x) / self.scale, (p.y - self.offset_y) / self.scale)
    }

    /// Convert a length in view pixels to scene units at the current zoom.
    /// Keeps hit radii consistent with the glyph's rendered size.
    pub fn scene_length(&self, view_length: f32) -> f32 {
        view_length / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < TOLERANCE, "{a} != {b}");
    }

    #[test]
    fn test_fit_centers_and_letterboxes() {
        // 100x100 scene into 200x400 view: scale 2, vertical letterbox
        let t = ViewTransform::fit(100.0, 100.0, 200.0, 400.0);
        assert_close(t.scale(), 2.0);
        let origin = t.to_view(ScenePoint::new(0.0, 0.0));
        assert_close(origin.x, 0.0);
        assert_close(origin.y, 100.0);
        let corner = t.to_view(ScenePoint::new(100.0, 100.0));
        assert_close(corner.x, 200.0);
        assert_close(corner.y, 300.0);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let t = ViewTransform::fit(1920.0, 1080.0, 800.0, 600.0);
        for &(x, y) in &[(0.0, 0.0), (10.5, 10.5), (1919.0, 1079.0), (-5.0, 2000.0)] {
            let s = ScenePoint::new(x, y);
            let back = t.to_scene(t.to_view(s));
            assert_close(back.x, s.x);
            assert_close(back.y, s.y);
        }
        for &(x, y) in &[(0.0, 0.0), (400.0, 300.0), (799.0, 599.0)] {
            let v = ViewPoint::new(x, y);
            let back = t.to_view(t.to_scene(v));
            assert_close(back.x, v.x);
            assert_close(back.y, v.y);
        }
    }

    #[test]
    fn test_scene_length_tracks_zoom() {
        let t = ViewTransform::fit(100.0, 100.0, 200.0, 200.0);
        assert_close(t.scene_length(12.0), 6.0);
        let t = ViewTransform::fit(400.0, 400.0, 200.0, 200.0);
        assert_close(t.scene_length(12.0), 24.0);
    }

    #[test]
    fn test_degenerate_sizes_fall_back_to_identity() {
        let t = ViewTransform::fit(0.0, 100.0, 200.0, 200.0);
        assert_eq!(t, ViewTransform::identity());
        let t = ViewTransform::fit(100.0, 100.0, 0.0, 200.0);
        assert_eq!(t, ViewTransform::identity());
    }
}
