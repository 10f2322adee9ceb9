//! Canvas elements and their text/image payloads.

/// `Element` tagged variant with per-variant draw dispatch.
pub mod element;
pub(crate) mod record;
/// Text payload, anchors and the text metrics provider seam.
pub mod text;
