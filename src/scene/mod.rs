//! Artboard and the collision-avoiding placement engine.

/// `Scene`, box predicates and the placement strategies.
pub mod artboard;
mod record;
