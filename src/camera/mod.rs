//! Keyframed virtual camera and helpers that derive its path.

#[allow(clippy::module_inception)]
pub mod camera;
pub mod path;
mod record;

pub use record::{CameraRecord, KeyRecord};
