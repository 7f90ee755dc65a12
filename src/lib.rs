//! A finger-drawing surface for a daily sketch journal: strokes captured from pointer input, drawn
//! with a two-color palette and a few fixed widths, and saved as PNG data URLs.

pub(crate) mod util;

pub mod components;
pub mod config;
pub mod engine;
pub mod journal;
pub mod render;

pub use components::{SaveOutcome, SaveSink, SketchCanvas, ToolSelection};
pub use config::{SurfaceConfig, Theme};
