//! Countertop Site Library
//!
//! This library provides the interactive pieces of a countertop remodeling
//! lead-generation site: a price-range estimator with lead serialization,
//! gallery filter and lightbox navigation, a before/after slider, and a
//! proxy that forwards room photos to an image-edit service.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod estimator;
pub mod gallery;
pub mod models;
pub mod redesign;
#[cfg(feature = "web")]
pub mod web;
