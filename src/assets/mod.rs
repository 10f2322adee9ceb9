//! Image decode and encode.

pub mod decode;
