//! Map annotation session
//!
//! [`MapSession`] owns the background raster, the marker store, and the
//! current fit transform, and wires the interaction controller and the
//! collaborators together. All mutation funnels through this single owner;
//! there are no other writers.

pub mod controller;
pub mod list;

pub use controller::{
    ClickOutcome, CommentPrompt, EditChoice, InteractionController, InteractionState,
    MarkerEditor, PromptReply,
};
pub use list::{ListEntry, ListProjection};

use std::path::Path;

use image::RgbaImage;

use crate::config::MapConfig;
use crate::domain::{MarkerId, MarkerStore, ViewPoint};
use crate::error::{Error, Result};
use crate::export;
use crate::render;
use crate::view::ViewTransform;

/// Owner of all annotation state for one loaded map.
#[derive(Debug)]
pub struct MapSession {
    background: Option<RgbaImage>,
    store: MarkerStore,
    transform: ViewTransform,
    controller: InteractionController,
    list: ListProjection,
    config: MapConfig,
    view_size: (f32, f32),
}

impl MapSession {
    pub fn new(config: MapConfig, view_width: f32, view_height: f32) -> Self {
        Self {
            background: None,
            store: MarkerStore::new(),
            transform: ViewTransform::identity(),
            controller: InteractionController::new(config),
            list: ListProjection::new(),
            config,
            view_size: (view_width, view_height),
        }
    }

    /// Load a new map image.
    ///
    /// On success the background is replaced wholesale, all markers are
    /// cleared, and the transform is re-fit to the view. A decode failure
    /// leaves the previous background and markers untouched.
    pub fn load_map(&mut self, path: &Path) -> Result<()> {
        let img = export::load_map(path)?;
        self.transform = ViewTransform::fit(
            img.width() as f32,
            img.height() as f32,
            self.view_size.0,
            self.view_size.1,
        );
        self.background = Some(img);
        self.store.clear();
        Ok(())
    }

    /// Update the view size and re-fit the current background.
    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view_size = (width, height);
        if let Some(background) = &self.background {
            self.transform = ViewTransform::fit(
                background.width() as f32,
                background.height() as f32,
                width,
                height,
            );
        }
    }

    /// Handle a primary click at view point `p`, driving the create/edit
    /// state machine with the given collaborators.
    pub fn click(
        &mut self,
        p: ViewPoint,
        prompt: &mut dyn CommentPrompt,
        editor: &mut dyn MarkerEditor,
    ) -> Result<ClickOutcome> {
        self.controller
            .handle_click(&mut self.store, &self.transform, p, prompt, editor)
    }

    /// Marker under the pointer, for picking a drag target on press.
    pub fn hit_test(&self, p: ViewPoint) -> Option<MarkerId> {
        self.controller.hit_test(&self.store, &self.transform, p)
    }

    /// Move a marker under an active drag. Called once per move event.
    pub fn drag_marker(&mut self, id: MarkerId, p: ViewPoint) {
        self.controller
            .drag_marker(&mut self.store, &self.transform, id, p);
    }

    /// Remove all markers, keeping the background.
    pub fn clear_markers(&mut self) {
        self.store.clear();
    }

    /// Draw the background and markers into a view-sized surface.
    pub fn draw_into(&self, surface: &mut RgbaImage) -> Result<()> {
        let background = self.background.as_ref().ok_or(Error::NoBackground)?;
        render::draw_all(surface, background, &self.store, &self.transform, &self.config);
        Ok(())
    }

    /// Flatten the background and markers into an exportable buffer.
    pub fn flatten(&self) -> Result<RgbaImage> {
        let background = self.background.as_ref().ok_or(Error::NoBackground)?;
        Ok(render::flatten(
            background,
            &self.store,
            &self.transform,
            &self.config,
        ))
    }

    /// Flatten and write a PNG at `path`. Aborts without a partial file on
    /// encode or write failure.
    pub fn save_map(&self, path: &Path) -> Result<()> {
        let flat = self.flatten()?;
        export::save_png(&flat, path)
    }

    /// Flatten and encode a PNG into an in-memory buffer.
    pub fn save_to_buffer(&self, buffer: &mut Vec<u8>) -> Result<()> {
        let flat = self.flatten()?;
        export::save_to_buffer(&flat, buffer)
    }

    /// Marker list rows for the display collaborator, in store order.
    pub fn marker_list(&mut self) -> &[ListEntry] {
        self.list.entries(&self.store)
    }

    pub fn store(&self) -> &MarkerStore {
        &self.store
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn background(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MarkerColor, MarkerShape};
    use crate::domain::ScenePoint;
    use image::Rgba;

    struct OneReply(PromptReply);

    impl CommentPrompt for OneReply {
        fn request_comment(&mut self, _title: &str, _default: &str) -> PromptReply {
            self.0.clone()
        }
    }

    struct FixedEditor {
        choice: EditChoice,
        calls: usize,
    }

    impl MarkerEditor for FixedEditor {
        fn edit(&mut self, _marker: &crate::domain::Marker) -> EditChoice {
            self.calls += 1;
            self.choice.clone()
        }
    }

    /// 100x100 opaque blue map on disk, session with a 200x200 view.
    fn loaded_session() -> (MapSession, tempfile::TempDir) {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 255, 255]));
        crate::export::save_png(&img, &path).unwrap();

        let mut session = MapSession::new(MapConfig::default(), 200.0, 200.0);
        session.load_map(&path).unwrap();
        (session, dir)
    }

    fn click_create(session: &mut MapSession, p: ViewPoint, comment: &str) -> ClickOutcome {
        let mut prompt = OneReply(PromptReply::accepted(comment));
        let mut editor = FixedEditor {
            choice: EditChoice::Dismissed,
            calls: 0,
        };
        session.click(p, &mut prompt, &mut editor).unwrap()
    }

    #[test]
    fn test_scenario_create_marker_at_clicked_point() {
        let (mut session, _dir) = loaded_session();
        let outcome = click_create(&mut session, ViewPoint::new(20.0, 20.0), "start");
        assert!(matches!(outcome, ClickOutcome::Created(_)));
        assert_eq!(session.store().len(), 1);
        let marker = session.store().markers().next().unwrap();
        assert_eq!(marker.position, ScenePoint::new(10.0, 10.0));
        assert_eq!(marker.shape, MarkerShape::Circle);
        assert_eq!(marker.color, MarkerColor::Red);
        assert_eq!(marker.comment, "start");
    }

    #[test]
    fn test_scenario_second_click_edits_not_creates() {
        let (mut session, _dir) = loaded_session();
        click_create(&mut session, ViewPoint::new(20.0, 20.0), "start");

        let mut prompt = OneReply(PromptReply::cancelled());
        let mut editor = FixedEditor {
            choice: EditChoice::Dismissed,
            calls: 0,
        };
        session
            .click(ViewPoint::new(20.0, 20.0), &mut prompt, &mut editor)
            .unwrap();
        assert_eq!(session.store().len(), 1);
        assert_eq!(editor.calls, 1);
    }

    #[test]
    fn test_scenario_delete_empties_store_and_list() {
        let (mut session, _dir) = loaded_session();
        click_create(&mut session, ViewPoint::new(20.0, 20.0), "start");

        let mut prompt = OneReply(PromptReply::cancelled());
        let mut editor = FixedEditor {
            choice: EditChoice::Delete,
            calls: 0,
        };
        let outcome = session
            .click(ViewPoint::new(20.0, 20.0), &mut prompt, &mut editor)
            .unwrap();
        assert!(matches!(outcome, ClickOutcome::Deleted(_)));
        assert!(session.store().is_empty());
        assert!(session.marker_list().is_empty());
    }

    #[test]
    fn test_scenario_flatten_encloses_markers_and_background() {
        let (mut session, _dir) = loaded_session();
        click_create(&mut session, ViewPoint::new(20.0, 20.0), "one");
        // Near the right edge: scene (99.5, 50), glyph extends past the map
        click_create(&mut session, ViewPoint::new(199.0, 100.0), "two");

        let flat = session.flatten().unwrap();
        // Glyph half-extent in scene units is 12 / 2 = 6 at 2x zoom, so the
        // second glyph stretches the canvas to x = 105.5
        assert_eq!(flat.dimensions(), (106, 100));
        assert_eq!(*flat.get_pixel(10, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*flat.get_pixel(99, 50), Rgba([255, 0, 0, 255]));
        // Past the background edge but inside the second glyph
        assert_eq!(*flat.get_pixel(103, 50), Rgba([255, 0, 0, 255]));
        // Background pixel away from both markers
        assert_eq!(*flat.get_pixel(50, 90), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_load_resets_markers_and_refits() {
        let (mut session, dir) = loaded_session();
        click_create(&mut session, ViewPoint::new(20.0, 20.0), "start");
        assert_eq!(session.store().len(), 1);

        let path = dir.path().join("other.png");
        let img = RgbaImage::from_pixel(50, 100, Rgba([0, 255, 0, 255]));
        crate::export::save_png(&img, &path).unwrap();
        session.load_map(&path).unwrap();
        assert!(session.store().is_empty());
        // 50x100 into 200x200 fits at 2x, centered horizontally
        assert_eq!(session.transform().scale(), 2.0);
        assert_eq!(session.transform().offset(), (50.0, 0.0));
    }

    #[test]
    fn test_failed_load_preserves_state() {
        let (mut session, dir) = loaded_session();
        click_create(&mut session, ViewPoint::new(20.0, 20.0), "start");

        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"garbage").unwrap();
        assert!(session.load_map(&bad).is_err());
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.background().unwrap().dimensions(), (100, 100));
    }

    #[test]
    fn test_clear_markers_keeps_background() {
        let (mut session, _dir) = loaded_session();
        click_create(&mut session, ViewPoint::new(20.0, 20.0), "start");
        session.clear_markers();
        assert!(session.store().is_empty());
        assert!(session.background().is_some());
        assert!(session.marker_list().is_empty());
    }

    #[test]
    fn test_save_map_writes_decodable_png() {
        let (mut session, dir) = loaded_session();
        click_create(&mut session, ViewPoint::new(20.0, 20.0), "start");
        let out = dir.path().join("annotated.png");
        session.save_map(&out).unwrap();
        let back = crate::export::load_map(&out).unwrap();
        assert_eq!(back, session.flatten().unwrap());

        let mut buffer = Vec::new();
        session.save_to_buffer(&mut buffer).unwrap();
        assert_eq!(&buffer[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_operations_without_background() {
        let session = MapSession::new(MapConfig::default(), 200.0, 200.0);
        assert!(matches!(session.flatten(), Err(Error::NoBackground)));
        let mut surface = RgbaImage::new(10, 10);
        assert!(matches!(
            session.draw_into(&mut surface),
            Err(Error::NoBackground)
        ));
    }
}
