//! Gallery interactions: project filter + lightbox, hero rotation, and the
//! before/after slider.

pub mod hero;
pub mod navigator;
pub mod slider;

pub use hero::{HeroCarousel, HERO_ROTATE_INTERVAL};
pub use navigator::{
    Direction, FilterButton, LightboxKey, LightboxView, NavigatorAction, NavigatorState,
    FILTER_ALL,
};
pub use slider::{SliderPosition, DEFAULT_SLIDER_VALUE};
