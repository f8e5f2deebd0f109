// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod config;
pub mod easing;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod notify;
pub mod raster;
pub mod render;
pub mod viewer;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub use animation::{AnimationFrame, ProgressAnimation};
pub use config::{Color, CountingMethod, DelegationMode, GaugeConfig, GeometryConstants, Icon};
pub use easing::ProgressCounter;
pub use error::GaugeError;
pub use gauge::GaugeSlider;
pub use geometry::{ArcPath, GeometryCache, Point, Rect};
pub use interaction::{Gesture, PanPhase, PointerEvent};
pub use layout::Layout;
pub use raster::Canvas;
pub use render::{DrawCommand, Scene};
pub use viewer::GaugeCommand;
