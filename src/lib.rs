//! Slime Arena - a top-down arena shooter simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, broad phase, steering, damage)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input capture and frame scheduling live outside this crate. A
//! driver feeds [`sim::TickInput`] into [`sim::tick`] once per displayed frame
//! and reads [`sim::Snapshot`] back for drawing.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Session defaults used when no viewport has been reported yet
pub mod consts {
    /// Nominal frame length the per-tick speeds were balanced against (60 Hz)
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default display area
    pub const DEFAULT_DISPLAY_WIDTH: f32 = 1280.0;
    pub const DEFAULT_DISPLAY_HEIGHT: f32 = 1080.0;

    /// Letterbox bands above and below the playable area
    pub const TOP_BAND_HEIGHT: f32 = 400.0;
    pub const BOTTOM_BAND_HEIGHT: f32 = 150.0;
}
