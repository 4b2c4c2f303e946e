//! Narration output.

/// Narration sink trait and built-in sinks.
pub mod sink;
