//! Hero banner image rotation.

use std::time::Duration;

/// How often the hero advances on its own.
pub const HERO_ROTATE_INTERVAL: Duration = Duration::from_millis(6500);

/// Hero banner with a row of selectable thumbnails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeroCarousel {
    images: Vec<String>,
    active: usize,
}

impl HeroCarousel {
    /// Creates a carousel showing the first image.
    #[must_use]
    pub fn new(images: Vec<String>) -> Self {
        Self { images, active: 0 }
    }

    /// Index of the highlighted thumbnail.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Image currently used as the hero background.
    #[must_use]
    pub fn active_image(&self) -> Option<&str> {
        self.images.get(self.active).map(String::as_str)
    }

    /// Shows the thumbnail at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.active = index;
        }
    }

    /// Advances to the next image, wrapping to the first. Inert when empty.
    pub fn tick(&mut self) {
        if !self.images.is_empty() {
            self.active = (self.active + 1) % self.images.len();
        }
    }
}
