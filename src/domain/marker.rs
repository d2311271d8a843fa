//! The marker entity

use crate::config::{MarkerColor, MarkerShape};
use crate::domain::geometry::ScenePoint;

/// Identity of a marker slot in a [`crate::domain::MarkerStore`].
///
/// Issued by the store that owns the marker and never reused within that
/// store's lifetime, so a stale id after deletion simply stops matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub(crate) u64);

/// A labeled point marker.
///
/// The position is in scene space so it survives zoom and pan. The comment
/// is non-empty at creation; the store does not re-validate it on edits
/// because the controller treats an empty reply as cancellation.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub position: ScenePoint,
    pub shape: MarkerShape,
    pub color: MarkerColor,
    pub comment: String,
}
