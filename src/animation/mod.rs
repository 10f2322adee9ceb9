//! Keyframe tracks and their shape-preserving interpolation.

pub mod interp;
pub mod keyframe;
