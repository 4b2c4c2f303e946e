//! The stage: playback hub, frame clock, options and the threaded runner.

/// Per-tick camera driver.
pub mod frame_clock;
/// Stage options.
pub mod opts;
/// Threaded stage runner and render surfaces.
pub mod runner;
/// The playback hub.
pub mod session;
