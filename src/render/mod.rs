//! Artboard composition and the camera render loop.

/// Grid and box-outline overlays.
pub mod debug;
/// `Painter` seam and the CPU `RasterPainter`.
pub mod paint;
/// Frame times and sequential/parallel rendering into a sink.
pub mod pipeline;
pub mod resample;
