//! Before/after comparison slider.
//!
//! The "after" image sits on top of the "before" image and is clipped from
//! the right so that only the left `value` percent of it shows.

use crate::models::parse_leading_integer;

/// Position of the slider when the range input has no usable value.
pub const DEFAULT_SLIDER_VALUE: u8 = 50;

/// Slider position in percent, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderPosition(u8);

impl SliderPosition {
    /// Creates a position, clamping to 100.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Reads a range input's value. Takes the leading integer, clamps into
    /// 0..=100, and falls back to [`DEFAULT_SLIDER_VALUE`] for non-numeric text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        parse_leading_integer(text)
            .map_or(Self(DEFAULT_SLIDER_VALUE), |value| Self(value.clamp(0, 100) as u8))
    }

    /// Percent of the "after" image shown.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// CSS `clip-path` for the "after" image.
    #[must_use]
    pub fn clip_path(self) -> String {
        format!("inset(0 {}% 0 0)", 100 - self.0)
    }
}

impl Default for SliderPosition {
    fn default() -> Self {
        Self(DEFAULT_SLIDER_VALUE)
    }
}
