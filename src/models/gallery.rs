//! Gallery project cards.

use serde::{Deserialize, Serialize};

/// Title shown in the lightbox when a card has none.
pub const DEFAULT_CARD_TITLE: &str = "Project";

/// One project in the gallery grid.
///
/// Cards are immutable once loaded; only their visibility changes as the
/// active filter changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryCard {
    /// Category tag used by the filter buttons (e.g. "Kitchen")
    pub category: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Thumbnail image reference
    pub thumbnail: String,
    /// Full-resolution image reference, if different from the thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

impl GalleryCard {
    /// Creates a card with only a thumbnail.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            thumbnail: thumbnail.into(),
            full: None,
        }
    }

    /// Sets the full-resolution image.
    #[must_use]
    pub fn with_full(mut self, full: impl Into<String>) -> Self {
        self.full = Some(full.into());
        self
    }

    /// Image shown in the lightbox: the full-resolution image, else the thumbnail.
    #[must_use]
    pub fn lightbox_image(&self) -> &str {
        self.full
            .as_deref()
            .filter(|full| !full.is_empty())
            .unwrap_or(&self.thumbnail)
    }

    /// Title shown in the lightbox, falling back to [`DEFAULT_CARD_TITLE`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_CARD_TITLE
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightbox_image_prefers_full() {
        let card = GalleryCard::new("Kitchen", "Oak", "thumb.jpg").with_full("full.jpg");
        assert_eq!(card.lightbox_image(), "full.jpg");

        let card = GalleryCard::new("Kitchen", "Oak", "thumb.jpg");
        assert_eq!(card.lightbox_image(), "thumb.jpg");

        let card = GalleryCard::new("Kitchen", "Oak", "thumb.jpg").with_full("");
        assert_eq!(card.lightbox_image(), "thumb.jpg");
    }

    #[test]
    fn test_display_title_fallback() {
        assert_eq!(GalleryCard::new("Bath", "", "a.jpg").display_title(), "Project");
        assert_eq!(GalleryCard::new("Bath", "Vanity", "a.jpg").display_title(), "Vanity");
    }
}
