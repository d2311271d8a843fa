//! Ordered marker collection and hit-testing

use crate::config::{MarkerColor, MarkerShape};
use crate::domain::geometry::ScenePoint;
use crate::domain::marker::{Marker, MarkerId};
use crate::error::{Error, Result};

/// Single source of truth for all markers on the current map.
///
/// Insertion order is preserved and doubles as z-order (later markers draw
/// on top) and as the order shown in list projections. Every mutation bumps
/// a revision counter that derived views use for cache invalidation.
#[derive(Debug, Default)]
pub struct MarkerStore {
    entries: Vec<(MarkerId, Marker)>,
    next_id: u64,
    revision: u64,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct and append a marker.
    ///
    /// Fails with [`Error::DuplicateAtPoint`] if `position` already falls
    /// inside an existing marker's hit region of radius `hit_radius`. The
    /// controller checks via [`MarkerStore::hit_test`] before calling, so
    /// this is a defended invariant rather than the primary check path.
    pub fn add(
        &mut self,
        position: ScenePoint,
        shape: MarkerShape,
        color: MarkerColor,
        comment: impl Into<String>,
        hit_radius: f32,
    ) -> Result<MarkerId> {
        if self.hit_test(position, hit_radius).is_some() {
            log::warn!(
                "rejected marker at ({}, {}): inside an existing hit region",
                position.x,
                position.y
            );
            return Err(Error::DuplicateAtPoint {
                x: position.x,
                y: position.y,
            });
        }
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.entries.push((
            id,
            Marker {
                position,
                shape,
                color,
                comment: comment.into(),
            },
        ));
        self.touch();
        Ok(id)
    }

    /// Topmost (last-inserted) marker whose hit disc of `radius` scene
    /// units contains `position`.
    pub fn hit_test(&self, position: ScenePoint, radius: f32) -> Option<MarkerId> {
        self.entries
            .iter()
            .rev()
            .find(|(_, marker)| marker.position.distance_to(position) <= radius)
            .map(|(id, _)| *id)
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, marker)| marker)
    }

    /// Remove a marker by identity. Idempotent: removing an absent marker
    /// is a no-op.
    pub fn remove(&mut self, id: MarkerId) {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        if self.entries.len() != before {
            self.touch();
        }
    }

    /// Change a marker's shape. No-op if the marker is absent.
    pub fn set_shape(&mut self, id: MarkerId, shape: MarkerShape) {
        if let Some(marker) = self.get_mut(id) {
            marker.shape = shape;
            self.touch();
        }
    }

    /// Change a marker's color. No-op if the marker is absent.
    pub fn set_color(&mut self, id: MarkerId, color: MarkerColor) {
        if let Some(marker) = self.get_mut(id) {
            marker.color = color;
            self.touch();
        }
    }

    /// Change a marker's comment. No-op if the marker is absent.
    pub fn set_comment(&mut self, id: MarkerId, comment: impl Into<String>) {
        if let Some(marker) = self.get_mut(id) {
            marker.comment = comment.into();
            self.touch();
        }
    }

    /// Move a marker to a new scene position (drag). No-op if absent.
    pub fn move_to(&mut self, id: MarkerId, position: ScenePoint) {
        if let Some(marker) = self.get_mut(id) {
            marker.position = position;
            self.touch();
        }
    }

    /// Remove all markers atomically.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.touch();
        }
    }

    /// Markers in insertion order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.entries.iter().map(|(_, marker)| marker)
    }

    /// Markers with their identities, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &Marker)> {
        self.entries.iter().map(|(id, marker)| (*id, marker))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutation counter for cache invalidation in derived views.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn get_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, marker)| marker)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
