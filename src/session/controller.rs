//! Click state machine and drag passthrough
//!
//! A primary click either opens the editor for the hit marker or asks the
//! comment prompt for a new one. Dialogs are external collaborators; they
//! run synchronously from the core's point of view, so a whole transition
//! completes within one call. Drag-to-move is a separate path that never
//! enters the state machine.

use crate::config::{MapConfig, MarkerColor, MarkerShape};
use crate::domain::{Marker, MarkerId, MarkerStore, ViewPoint};
use crate::error::Result;
use crate::view::ViewTransform;

/// Reply from the external text-entry collaborator.
#[derive(Clone, Debug)]
pub struct PromptReply {
    pub accepted: bool,
    pub text: String,
}

impl PromptReply {
    pub fn accepted(text: impl Into<String>) -> Self {
        Self {
            accepted: true,
            text: text.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            accepted: false,
            text: String::new(),
        }
    }
}

/// External modal text-entry collaborator.
pub trait CommentPrompt {
    /// Ask the user for a comment. `default` is pre-filled text (the
    /// current comment when editing, empty when creating).
    fn request_comment(&mut self, title: &str, default: &str) -> PromptReply;
}

/// One choice made in the external marker editor dialog.
#[derive(Clone, Debug, PartialEq)]
pub enum EditChoice {
    SetShape(MarkerShape),
    SetColor(MarkerColor),
    /// Re-prompt for the comment, pre-filled with the current one.
    EditComment,
    Delete,
    /// Dialog closed without choosing anything.
    Dismissed,
}

/// External marker editor collaborator (shape/color picker plus delete).
pub trait MarkerEditor {
    fn edit(&mut self, marker: &Marker) -> EditChoice;
}

/// What a primary click ended up doing.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Created(MarkerId),
    Edited(MarkerId),
    Deleted(MarkerId),
    /// Nothing changed: prompt cancelled, empty comment, editor dismissed,
    /// or a click while a modal collaborator is already open.
    Cancelled,
}

/// Interaction phase. `AwaitingCommentInput` and `EditingMarker` model the
/// window during which a modal collaborator owns the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    AwaitingCommentInput,
    EditingMarker,
}

/// Routes pointer input to the marker store via the collaborators.
#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    config: MapConfig,
}

impl InteractionController {
    pub fn new(config: MapConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            config,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Handle a primary click at view point `p`.
    ///
    /// A hit on an existing marker always routes to the editor and never
    /// creates a marker; a miss prompts for a comment and creates one if
    /// the reply is accepted and non-empty.
    pub fn handle_click(
        &mut self,
        store: &mut MarkerStore,
        transform: &ViewTransform,
        p: ViewPoint,
        prompt: &mut dyn CommentPrompt,
        editor: &mut dyn MarkerEditor,
    ) -> Result<ClickOutcome> {
        if self.state != InteractionState::Idle {
            return Ok(ClickOutcome::Cancelled);
        }
        let s = transform.to_scene(p);
        let radius = transform.scene_length(self.config.hit_radius);
        match store.hit_test(s, radius) {
            Some(id) => {
                self.state = InteractionState::EditingMarker;
                let outcome = Self::run_editor(store, id, prompt, editor);
                self.state = InteractionState::Idle;
                Ok(outcome)
            }
            None => {
                self.state = InteractionState::AwaitingCommentInput;
                let reply = prompt.request_comment("Enter a comment for this marker:", "");
                self.state = InteractionState::Idle;
                if reply.accepted && !reply.text.is_empty() {
                    let id = store.add(
                        s,
                        self.config.default_shape,
                        self.config.default_color,
                        reply.text,
                        radius,
                    )?;
                    Ok(ClickOutcome::Created(id))
                } else {
                    // Empty comment is cancellation, not an empty marker
                    Ok(ClickOutcome::Cancelled)
                }
            }
        }
    }

    fn run_editor(
        store: &mut MarkerStore,
        id: MarkerId,
        prompt: &mut dyn CommentPrompt,
        editor: &mut dyn MarkerEditor,
    ) -> ClickOutcome {
        let Some(marker) = store.get(id).cloned() else {
            return ClickOutcome::Cancelled;
        };
        match editor.edit(&marker) {
            EditChoice::SetShape(shape) => {
                store.set_shape(id, shape);
                ClickOutcome::Edited(id)
            }
            EditChoice::SetColor(color) => {
                store.set_color(id, color);
                ClickOutcome::Edited(id)
            }
            EditChoice::EditComment => {
                let reply = prompt
                    .request_comment("Enter a new comment for this marker:", &marker.comment);
                if reply.accepted && !reply.text.is_empty() {
                    store.set_comment(id, reply.text);
                    ClickOutcome::Edited(id)
                } else {
                    ClickOutcome::Cancelled
                }
            }
            EditChoice::Delete => {
                store.remove(id);
                ClickOutcome::Deleted(id)
            }
            EditChoice::Dismissed => ClickOutcome::Cancelled,
        }
    }

    /// Marker under the pointer, if any. The UI uses this to pick a drag
    /// target on press.
    pub fn hit_test(
        &self,
        store: &MarkerStore,
        transform: &ViewTransform,
        p: ViewPoint,
    ) -> Option<MarkerId> {
        let radius = transform.scene_length(self.config.hit_radius);
        store.hit_test(transform.to_scene(p), radius)
    }

    /// Drag passthrough: move `id` to the scene position under `p`. Called
    /// once per pointer-move event; independent of the click state machine
    /// and ignored while a modal collaborator is open.
    pub fn drag_marker(
        &self,
        store: &mut MarkerStore,
        transform: &ViewTransform,
        id: MarkerId,
        p: ViewPoint,
    ) {
        if self.state == InteractionState::Idle {
            store.move_to(id, transform.to_scene(p));
        }
    }
}
