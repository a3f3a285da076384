//! Gallery slots, the overlay editor, and the controller tying them together.
//!
//! # Slot lifecycle
//!
//! A slot goes from empty to populated when a new image is saved into it and
//! is overwritten as a whole on every later save. There is no delete.
//!
//! # Editor lifecycle
//!
//! `Closed -> Open(source, pending_action) -> Closed`. The editor opens when a
//! slot is chosen for add, replace or edit and closes on save or cancel. Only
//! one editor is open at a time.

mod controller;
mod editor;
mod slots;

pub use controller::{
    ControllerState, EditorTarget, Event, GalleryController, GalleryError, PickTarget,
    SaveOutcome,
};
pub use editor::{AspectRatio, EditAction, Editor, EditorError, EditorLimits};
pub use slots::{Gallery, SlotError};
