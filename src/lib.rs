//! Marker annotation engine for raster maps
//!
//! This crate implements the core of a "drop labeled pins on a map, export a
//! flattened image" tool: the marker data model and ordered store, the
//! scene/view coordinate mapping, the click state machine that decides
//! between creating and editing a marker, and the CPU compositor that burns
//! markers into an exportable PNG.
//!
//! The GUI shell (windows, dialogs, list widgets) is out of scope. Modal
//! dialogs are modeled as collaborator traits ([`session::CommentPrompt`],
//! [`session::MarkerEditor`]) that return plain data.

pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
pub mod view;

pub use config::{MapConfig, MarkerColor, MarkerShape};
pub use domain::{Marker, MarkerId, MarkerStore, ScenePoint, SceneRect, ViewPoint};
pub use error::{Error, Result};
pub use session::{ClickOutcome, InteractionController, ListProjection, MapSession};
pub use view::ViewTransform;
