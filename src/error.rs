//! Error types surfaced by the annotation engine

use std::path::PathBuf;

/// Errors from map loading, exporting, and the marker store.
///
/// A cancelled or dismissed dialog is never an error; collaborators report
/// cancellation through their ordinary return values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The background image could not be decoded. The load is aborted and
    /// the previous background and markers are left untouched.
    #[error("failed to decode map image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// PNG encoding of the flattened map failed.
    #[error("failed to encode flattened map")]
    Encode(#[from] png::EncodingError),

    /// The flattened map could not be written out. No partial file is left
    /// behind.
    #[error("failed to write flattened map")]
    Write(#[from] std::io::Error),

    /// A marker was added inside an existing marker's hit region. The
    /// controller routes such clicks to selection, so reaching this
    /// indicates a caller bug rather than a user-facing condition.
    #[error("marker at ({x}, {y}) overlaps an existing marker's hit region")]
    DuplicateAtPoint { x: f32, y: f32 },

    /// An operation that needs a background image ran before any map was
    /// loaded.
    #[error("no map image is loaded")]
    NoBackground,
}

pub type Result<T> = std::result::Result<T, Error>;
