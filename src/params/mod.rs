//! Parameter definitions with physical units and documented semantics.
//!
//! Every run is fully described by these structs; nothing is held in
//! process-wide state.

mod analysis;
mod capture;
mod engine;

// Re-export all types
pub use analysis::{RegionConfig, SpectrogramConfig};
pub use capture::CaptureConfig;
pub use engine::{engine_constants, EngineParams, StackedFmParams};
