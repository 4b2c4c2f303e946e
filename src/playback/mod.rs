//! Playback state, the state machine that owns it, and the autoplay timer.

/// Deadline-based autoplay timer.
pub mod autoplay;
/// Playback state machine.
pub mod machine;
/// Playback state and quality levels.
pub mod state;
