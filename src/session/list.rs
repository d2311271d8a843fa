//! Read-only list projection of the marker store
//!
//! Display collaborators (the side list widget) render from this instead
//! of touching the store. The projection is a pure function of store state
//! cached against the store's revision counter.

use crate::config::MarkerColor;
use crate::domain::MarkerStore;

/// One row of the marker list: swatch color plus comment.
#[derive(Clone, Debug, PartialEq)]
pub struct ListEntry {
    pub color: MarkerColor,
    pub comment: String,
}

/// Cached, order-preserving `(color, comment)` view of a [`MarkerStore`].
#[derive(Debug, Default)]
pub struct ListProjection {
    revision: Option<u64>,
    entries: Vec<ListEntry>,
}

impl ListProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in store order, re-derived when the store has mutated since
    /// the last call.
    pub fn entries(&mut self, store: &MarkerStore) -> &[ListEntry] {
        if self.revision != Some(store.revision()) {
            self.entries = store
                .markers()
                .map(|marker| ListEntry {
                    color: marker.color,
                    comment: marker.comment.clone(),
                })
                .collect();
            self.revision = Some(store.revision());
        }
        &self.entries
    }
}
