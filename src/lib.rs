//! A custom-drawn strip of closable, reorderable, scrollable tabs.
//!
//! The [`strip`] module is a headless engine (layout, hit-testing,
//! interaction state machine, animation). [`render`] paints it into plain
//! `0x00RRGGBB` pixel buffers, and [`host`] embeds it in winit windows
//! through softbuffer surfaces.

pub mod config;
pub mod core;
mod error;
pub mod host;
pub mod render;
pub mod strip;

pub use error::StripError;
pub use strip::{StripHit, StripRequest, TabStrip};
