//! Geometry in scene and view space
//!
//! Scene space is fixed to the background raster's pixel grid and is
//! invariant under zoom. View space is the on-screen coordinate system.
//! The two point types keep the spaces from being mixed by accident.

/// A point in scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScenePoint {
    pub x: f32,
    pub y: f32,
}

impl ScenePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another scene point.
    pub fn distance_to(self, other: ScenePoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A point in view space (on-screen pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewPoint {
    pub x: f32,
    pub y: f32,
}

impl ViewPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SceneRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Square of half-extent `half` centered on `center`.
    pub fn around(center: ScenePoint, half: f32) -> Self {
        Self::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )
    }

    /// Smallest rectangle enclosing both rectangles.
    pub fn union(self, other: SceneRect) -> SceneRect {
        SceneRect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn width(self) -> f32 {
        self.right - self.left
    }

    pub fn height(self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(self, point: ScenePoint) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = ScenePoint::new(0.0, 0.0);
        let b = ScenePoint::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn test_union_encloses_both() {
        let a = SceneRect::from_size(100.0, 50.0);
        let b = SceneRect::around(ScenePoint::new(120.0, -10.0), 5.0);
        let u = a.union(b);
        assert_eq!(u.left, 0.0);
        assert_eq!(u.top, -15.0);
        assert_eq!(u.right, 125.0);
        assert_eq!(u.bottom, 50.0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = SceneRect::from_size(10.0, 10.0);
        assert!(r.contains(ScenePoint::new(0.0, 0.0)));
        assert!(r.contains(ScenePoint::new(9.9, 9.9)));
        assert!(!r.contains(ScenePoint::new(10.0, 5.0)));
        assert!(!r.contains(ScenePoint::new(-0.1, 5.0)));
    }
}
