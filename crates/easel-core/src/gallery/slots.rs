//! The ordered sequence of gallery images.
//!
//! Every mutation builds a fresh sequence, so a [`Gallery::snapshot`] taken
//! earlier (for example, the list the front end is currently rendering) is
//! never changed under its holder.

use std::sync::Arc;

use thiserror::Error;

use crate::encode::OutputImage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("Slot {index} is out of range (gallery has {len} images)")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Arc<[OutputImage]>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::from_images(Vec::new())
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_images(images: Vec<OutputImage>) -> Self {
        Self {
            images: images.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True while no image has been added; the front end shows its empty
    /// "add assets" state.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OutputImage> {
        self.images.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OutputImage> {
        self.images.iter()
    }

    /// Shared handle to the current sequence.
    pub fn snapshot(&self) -> Arc<[OutputImage]> {
        Arc::clone(&self.images)
    }

    /// Append an image, returning its slot index.
    pub fn push(&mut self, image: OutputImage) -> usize {
        let index = self.images.len();
        let mut next = Vec::with_capacity(index + 1);
        next.extend(self.images.iter().cloned());
        next.push(image);
        self.images = next.into();
        index
    }

    /// Overwrite one populated slot.
    pub fn replace(&mut self, index: usize, image: OutputImage) -> Result<(), SlotError> {
        if index >= self.images.len() {
            return Err(SlotError::OutOfRange {
                index,
                len: self.images.len(),
            });
        }
        self.overwrite(index, image);
        Ok(())
    }

    /// Store a saved edit: overwrite `target` if it is populated, append
    /// otherwise. Returns the index the image ended up at.
    pub fn save(&mut self, target: usize, image: OutputImage) -> usize {
        if target < self.images.len() {
            self.overwrite(target, image);
            target
        } else {
            self.push(image)
        }
    }

    /// Build the next sequence with `index` swapped out. Callers check the
    /// index is in range.
    fn overwrite(&mut self, index: usize, image: OutputImage) {
        let mut next: Vec<OutputImage> = self.images.to_vec();
        if let Some(slot) = next.get_mut(index) {
            *slot = image;
        }
        self.images = next.into();
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a OutputImage;
    type IntoIter = std::slice::Iter<'a, OutputImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
