//! Frame consumers for the render loop.

/// Sink trait plus in-memory, PNG sequence and raw stream sinks.
pub mod sink;
