//! Gallery controller: which slot menu is open, which slot the editor works
//! on, and the effects (decode, render, commit) tied to those transitions.
//!
//! UI state lives in [`ControllerState`], a plain record updated by the pure
//! [`ControllerState::apply`]. [`GalleryController`] wraps it together with
//! the gallery and the open editor and performs the side effects.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::editor::{EditAction, Editor, EditorError, EditorLimits};
use super::slots::{Gallery, SlotError};
use crate::decode::{decode_data_uri, DecodeError};
use crate::transform::RenderOptions;

/// Where a picked file should go once it has been read.
///
/// Handed to the front end when it opens the file picker and handed back
/// with the file contents, so the slot index travels with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "slot", rename_all = "snake_case")]
pub enum PickTarget {
    /// A new slot at the end of the gallery.
    Append,
    /// Overwrite an existing slot.
    Replace(usize),
}

/// The slot an open editor will save into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorTarget {
    pub slot_index: usize,
    pub pending_action: EditAction,
}

/// UI events the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The "more" button on a slot was clicked.
    ToggleMenu(usize),
    /// A click landed outside the open menu.
    DismissMenu,
    /// A menu entry other than Replace was chosen.
    ChooseAction { slot: usize, action: EditAction },
    /// Replace was chosen; the file picker opens.
    RequestReplace(usize),
    /// The Add button was clicked; the file picker opens.
    RequestAdd,
    /// The file picker was dismissed or its file could not be read.
    PickCancelled,
    /// A picked file was read and the editor opened on it.
    FileLoaded { slot: usize },
    /// The editor overlay closed (saved or cancelled).
    EditorClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControllerState {
    pub open_menu_slot: Option<usize>,
    pub editor_target: Option<EditorTarget>,
    pub pending_pick: Option<PickTarget>,
}

impl ControllerState {
    /// Pure transition: the state after `event`.
    pub fn apply(self, event: &Event) -> ControllerState {
        match *event {
            Event::ToggleMenu(slot) => ControllerState {
                open_menu_slot: if self.open_menu_slot == Some(slot) {
                    None
                } else {
                    Some(slot)
                },
                ..self
            },
            Event::DismissMenu => ControllerState {
                open_menu_slot: None,
                ..self
            },
            Event::ChooseAction { slot, action } => ControllerState {
                open_menu_slot: None,
                editor_target: Some(EditorTarget {
                    slot_index: slot,
                    pending_action: action,
                }),
                ..self
            },
            Event::RequestReplace(slot) => ControllerState {
                pending_pick: Some(PickTarget::Replace(slot)),
                ..self
            },
            Event::RequestAdd => ControllerState {
                pending_pick: Some(PickTarget::Append),
                ..self
            },
            Event::PickCancelled => ControllerState {
                pending_pick: None,
                ..self
            },
            Event::FileLoaded { slot } => ControllerState {
                open_menu_slot: None,
                editor_target: Some(EditorTarget {
                    slot_index: slot,
                    pending_action: EditAction::Crop,
                }),
                pending_pick: None,
            },
            Event::EditorClosed => ControllerState {
                editor_target: None,
                ..self
            },
        }
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_target.is_some()
    }
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("No editor is open")]
    NoEditorOpen,

    #[error("An editor is already open on slot {0}")]
    EditorBusy(usize),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Result of a save request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The edit was stored at `slot` and the editor closed.
    Saved { slot: usize },
    /// No crop had been reported yet; nothing happened.
    NoCrop,
}

/// Owns the gallery, the UI state record and the open editor.
#[derive(Debug, Clone, Default)]
pub struct GalleryController {
    state: ControllerState,
    gallery: Gallery,
    editor: Option<Editor>,
    options: RenderOptions,
    limits: EditorLimits,
}

impl GalleryController {
    /// Build a controller with custom render options and zoom bounds.
    /// Unusable bounds are rejected with [`EditorError::InvalidLimits`].
    pub fn new(options: RenderOptions, limits: EditorLimits) -> Result<Self, GalleryError> {
        let limits = limits.validate()?;
        Ok(Self {
            options,
            limits,
            ..Self::default()
        })
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.editor.as_mut()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn dispatch(&mut self, event: Event) {
        let next = self.state.apply(&event);
        debug!(?event, before = ?self.state, after = ?next, "controller transition");
        self.state = next;
    }

    fn ensure_editor_closed(&self) -> Result<(), GalleryError> {
        match self.state.editor_target {
            Some(target) => Err(GalleryError::EditorBusy(target.slot_index)),
            None => Ok(()),
        }
    }

    fn ensure_slot(&self, slot: usize) -> Result<(), GalleryError> {
        if slot < self.gallery.len() {
            Ok(())
        } else {
            Err(SlotError::OutOfRange {
                index: slot,
                len: self.gallery.len(),
            }
            .into())
        }
    }

    pub fn toggle_menu(&mut self, slot: usize) {
        self.dispatch(Event::ToggleMenu(slot));
    }

    pub fn dismiss_menu(&mut self) {
        self.dispatch(Event::DismissMenu);
    }

    /// Start adding a new image. The returned target goes back in with the
    /// picked file.
    pub fn request_add(&mut self) -> PickTarget {
        self.dispatch(Event::RequestAdd);
        PickTarget::Append
    }

    /// Start replacing `slot` with a newly picked file.
    pub fn request_replace(&mut self, slot: usize) -> Result<PickTarget, GalleryError> {
        self.ensure_slot(slot)?;
        self.dispatch(Event::RequestReplace(slot));
        Ok(PickTarget::Replace(slot))
    }

    pub fn pick_cancelled(&mut self) {
        self.dispatch(Event::PickCancelled);
    }

    /// A picked file arrived as a data URI: decode it and open the editor
    /// with a crop.
    ///
    /// On decode failure the editor stays closed and the pending pick is
    /// dropped.
    pub fn file_picked(&mut self, target: PickTarget, data_uri: &str) -> Result<(), GalleryError> {
        self.ensure_editor_closed()?;
        let slot = match target {
            PickTarget::Append => self.gallery.len(),
            PickTarget::Replace(slot) => {
                self.ensure_slot(slot)?;
                slot
            }
        };

        let source = match decode_data_uri(data_uri) {
            Ok(source) => source,
            Err(err) => {
                warn!(?target, error = %err, "picked file could not be decoded");
                self.dispatch(Event::PickCancelled);
                return Err(err.into());
            }
        };

        self.editor = Some(Editor::with_limits(source, EditAction::Crop, self.limits));
        self.dispatch(Event::FileLoaded { slot });
        Ok(())
    }

    /// Open the editor on an existing slot with `action` as its starting
    /// adjustment.
    pub fn choose_action(&mut self, slot: usize, action: EditAction) -> Result<(), GalleryError> {
        self.ensure_editor_closed()?;
        let image = self.gallery.get(slot).ok_or(SlotError::OutOfRange {
            index: slot,
            len: self.gallery.len(),
        })?;

        let source = decode_data_uri(&image.data_uri)?;
        self.editor = Some(Editor::with_limits(source, action, self.limits));
        self.dispatch(Event::ChooseAction { slot, action });
        Ok(())
    }

    /// Render the open editor and store the result.
    ///
    /// Without a crop this is a silent no-op. A render failure leaves the
    /// editor open so the user can retry or cancel.
    pub fn save(&mut self) -> Result<SaveOutcome, GalleryError> {
        let target = self.state.editor_target.ok_or(GalleryError::NoEditorOpen)?;
        let editor = self.editor.as_ref().ok_or(GalleryError::NoEditorOpen)?;

        let image = match editor.save(&self.options) {
            Ok(image) => image,
            Err(EditorError::NoCropSelected) => {
                debug!(slot = target.slot_index, "save ignored, no crop selected");
                return Ok(SaveOutcome::NoCrop);
            }
            Err(err) => {
                warn!(slot = target.slot_index, error = %err, "save failed");
                return Err(err.into());
            }
        };

        let slot = self.gallery.save(target.slot_index, image);
        self.editor = None;
        self.dispatch(Event::EditorClosed);
        Ok(SaveOutcome::Saved { slot })
    }

    /// Close the editor without saving.
    pub fn cancel(&mut self) {
        self.editor = None;
        self.dispatch(Event::EditorClosed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;
    use crate::encode::OutputImage;
    use crate::transform::{render, FlipState, Rectangle};

    fn image_uri(width: u32, height: u32, rgb: [u8; 3]) -> OutputImage {
        let src = DecodedImage::filled(width, height, rgb);
        render(
            &src,
            &Rectangle::full(width, height),
            0.0,
            FlipState::default(),
            &RenderOptions::default(),
        )
        .unwrap()
    }

    fn controller_with(n: u32) -> GalleryController {
        let mut controller = GalleryController::default();
        for i in 0..n {
            let target = controller.request_add();
            let uri = image_uri(8 + i, 8, [i as u8 * 40, 0, 0]);
            controller.file_picked(target, &uri.data_uri).unwrap();
            controller
                .editor_mut()
                .unwrap()
                .set_crop(Rectangle::full(8 + i, 8));
            controller.save().unwrap();
        }
        controller
    }

    // ---- pure transitions ----

    #[test]
    fn test_toggle_menu() {
        let s = ControllerState::default().apply(&Event::ToggleMenu(2));
        assert_eq!(s.open_menu_slot, Some(2));
        let s = s.apply(&Event::ToggleMenu(1));
        assert_eq!(s.open_menu_slot, Some(1));
        let s = s.apply(&Event::ToggleMenu(1));
        assert_eq!(s.open_menu_slot, None);
    }

    #[test]
    fn test_dismiss_menu() {
        let s = ControllerState::default()
            .apply(&Event::ToggleMenu(0))
            .apply(&Event::DismissMenu);
        assert_eq!(s, ControllerState::default());
    }

    #[test]
    fn test_choose_action_closes_menu_and_targets_slot() {
        let s = ControllerState::default().apply(&Event::ToggleMenu(3)).apply(&Event::ChooseAction {
            slot: 3,
            action: EditAction::Rotate,
        });
        assert_eq!(s.open_menu_slot, None);
        assert_eq!(
            s.editor_target,
            Some(EditorTarget {
                slot_index: 3,
                pending_action: EditAction::Rotate
            })
        );
        assert!(s.is_editor_open());
    }

    #[test]
    fn test_replace_flow_carries_index() {
        let s = ControllerState::default()
            .apply(&Event::ToggleMenu(1))
            .apply(&Event::RequestReplace(1));
        assert_eq!(s.pending_pick, Some(PickTarget::Replace(1)));
        assert_eq!(s.open_menu_slot, Some(1));

        let s = s.apply(&Event::FileLoaded { slot: 1 });
        assert_eq!(s.pending_pick, None);
        assert_eq!(s.open_menu_slot, None);
        assert_eq!(
            s.editor_target,
            Some(EditorTarget {
                slot_index: 1,
                pending_action: EditAction::Crop
            })
        );
    }

    #[test]
    fn test_pick_cancelled() {
        let s = ControllerState::default()
            .apply(&Event::RequestAdd)
            .apply(&Event::PickCancelled);
        assert_eq!(s.pending_pick, None);
        assert!(!s.is_editor_open());
    }

    #[test]
    fn test_editor_closed() {
        let s = ControllerState::default()
            .apply(&Event::FileLoaded { slot: 0 })
            .apply(&Event::EditorClosed);
        assert!(!s.is_editor_open());
    }

    // ---- controller effects ----

    #[test]
    fn test_add_to_empty_gallery() {
        let controller = controller_with(1);
        assert_eq!(controller.gallery().len(), 1);
        assert!(controller.editor().is_none());
        assert!(!controller.state().is_editor_open());
    }

    #[test]
    fn test_add_appends_at_end() {
        let mut controller = controller_with(3);
        let target = controller.request_add();
        let uri = image_uri(5, 5, [0, 255, 0]);
        controller.file_picked(target, &uri.data_uri).unwrap();
        assert_eq!(controller.state().editor_target.unwrap().slot_index, 3);

        controller
            .editor_mut()
            .unwrap()
            .set_crop(Rectangle::full(5, 5));
        assert_eq!(controller.save().unwrap(), SaveOutcome::Saved { slot: 3 });
        assert_eq!(controller.gallery().len(), 4);
    }

    #[test]
    fn test_edit_replaces_only_target_slot() {
        let mut controller = controller_with(5);
        let before = controller.gallery().snapshot();

        controller.choose_action(2, EditAction::Rotate).unwrap();
        let editor = controller.editor_mut().unwrap();
        assert_eq!(editor.rotation(), 90.0);
        editor.set_crop(Rectangle::full(10, 8));

        assert_eq!(controller.save().unwrap(), SaveOutcome::Saved { slot: 2 });
        let after = controller.gallery();
        assert_eq!(after.len(), 5);
        assert_eq!((after.get(2).unwrap().width, after.get(2).unwrap().height), (8, 10));
        for i in [0usize, 1, 3, 4] {
            assert_eq!(after.get(i), Some(&before[i]));
        }
    }

    #[test]
    fn test_replace_via_file_picker() {
        let mut controller = controller_with(2);
        controller.toggle_menu(0);
        let target = controller.request_replace(0).unwrap();
        assert_eq!(target, PickTarget::Replace(0));

        let uri = image_uri(20, 10, [0, 0, 255]);
        controller.file_picked(target, &uri.data_uri).unwrap();
        assert_eq!(controller.state().open_menu_slot, None);

        controller
            .editor_mut()
            .unwrap()
            .set_crop(Rectangle::new(0.0, 0.0, 16.0, 9.0));
        controller.save().unwrap();
        assert_eq!(controller.gallery().len(), 2);
        assert_eq!(controller.gallery().get(0).unwrap().width, 16);
    }

    #[test]
    fn test_request_replace_out_of_range() {
        let mut controller = controller_with(1);
        assert!(matches!(
            controller.request_replace(4),
            Err(GalleryError::Slot(SlotError::OutOfRange { index: 4, len: 1 }))
        ));
    }

    #[test]
    fn test_save_without_crop_is_noop() {
        let mut controller = controller_with(1);
        controller.choose_action(0, EditAction::Crop).unwrap();
        assert_eq!(controller.save().unwrap(), SaveOutcome::NoCrop);
        assert!(controller.editor().is_some());
        assert!(controller.state().is_editor_open());
    }

    #[test]
    fn test_save_failure_keeps_editor_open() {
        let mut controller = controller_with(1);
        let before = controller.gallery().clone();
        controller.choose_action(0, EditAction::Crop).unwrap();
        controller
            .editor_mut()
            .unwrap()
            .set_crop(Rectangle::new(0.0, 0.0, -1.0, 4.0));

        assert!(matches!(controller.save(), Err(GalleryError::Editor(_))));
        assert!(controller.editor().is_some());
        assert_eq!(controller.gallery(), &before);
    }

    #[test]
    fn test_undecodable_file_leaves_editor_closed() {
        let mut controller = GalleryController::default();
        let target = controller.request_add();
        let result = controller.file_picked(target, "data:image/png;base64,AAAA");
        assert!(matches!(result, Err(GalleryError::Decode(_))));
        assert!(controller.editor().is_none());
        assert_eq!(controller.state(), ControllerState::default());
    }

    #[test]
    fn test_only_one_editor_at_a_time() {
        let mut controller = controller_with(2);
        controller.choose_action(0, EditAction::Crop).unwrap();
        assert!(matches!(
            controller.choose_action(1, EditAction::Rotate),
            Err(GalleryError::EditorBusy(0))
        ));
    }

    #[test]
    fn test_cancel_closes_without_saving() {
        let mut controller = controller_with(1);
        let before = controller.gallery().clone();
        controller.choose_action(0, EditAction::FlipHorizontal).unwrap();
        controller.cancel();
        assert!(controller.editor().is_none());
        assert!(!controller.state().is_editor_open());
        assert_eq!(controller.gallery(), &before);
    }

    #[test]
    fn test_save_with_no_editor() {
        let mut controller = GalleryController::default();
        assert!(matches!(controller.save(), Err(GalleryError::NoEditorOpen)));
    }

    #[test]
    fn test_configured_zoom_limits_reach_editor() {
        let limits = EditorLimits {
            min_zoom: 1.0,
            max_zoom: 2.0,
            zoom_step: 0.5,
        };
        let mut controller = GalleryController::new(RenderOptions::default(), limits).unwrap();
        let target = controller.request_add();
        let uri = image_uri(4, 4, [1, 1, 1]);
        controller.file_picked(target, &uri.data_uri).unwrap();
        let editor = controller.editor_mut().unwrap();
        editor.set_zoom(3.0);
        assert_eq!(editor.zoom(), 2.0);
    }

    #[test]
    fn test_invalid_zoom_limits_rejected() {
        let limits = EditorLimits {
            min_zoom: 3.0,
            max_zoom: 1.0,
            ..EditorLimits::default()
        };
        let result = GalleryController::new(RenderOptions::default(), limits);
        assert!(matches!(
            result,
            Err(GalleryError::Editor(EditorError::InvalidLimits(_)))
        ));
    }
}
