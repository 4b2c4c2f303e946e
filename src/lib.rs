//! vignette stages short sequences of narrated 3D scenes and plays through them.
//!
//! The crate is the playback core of such a show: it owns the scene sequence, the
//! play/pause/navigate state machine, the autoplay timer, the one-utterance-at-a-time narration
//! policy, and the per-tick camera trajectory for each scene's cinematic style. Scene content,
//! speech and pixels come from collaborators behind traits.
//!
//! # Pieces
//!
//! - [`SceneCatalog`]: topic → ordered [`SceneDef`] records (static table, JSON file, or remote).
//! - [`NarrationSink`]: speaks a scene's narration, replacing anything in flight.
//! - [`PlaybackMachine`]: pure transitions over [`PlaybackState`] that report activations.
//! - [`AutoplayScheduler`]: deadline timer re-armed on every relevant state change.
//! - [`CameraTrajectory`] + [`FrameClock`]: `(style, t, previous pose) -> pose` once per tick.
//! - [`Stage`]: the hub tying them together; [`StageRunner`] runs it on one owning thread.
//!
//! # Two clocks
//!
//! Render ticks ([`Stage::tick`]) and autoplay firings ([`Stage::poll_autoplay`]) are driven
//! independently. Both go through the stage's methods, which are the only writers of playback
//! state.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Camera poses and trajectories.
pub mod camera;
/// Narration sinks.
pub mod narration;
/// Playback state machine and autoplay timer.
pub mod playback;
/// Scene model and catalogs.
pub mod scene;
/// Stage hub, frame clock, options and runner.
pub mod stage;

pub use crate::foundation::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::foundation::core::{Fps, FrameIndex, Rgba8, Vec3};
pub use crate::foundation::error::{VignetteError, VignetteResult};
pub use crate::foundation::math::Rng64;

pub use crate::camera::pose::CameraPose;
pub use crate::camera::trajectory::{CameraTrajectory, TrajectoryParams};
pub use crate::narration::sink::{NarrationSink, SilentNarrator, TracingNarrator};
pub use crate::playback::autoplay::{AutoplayScheduler, DEFAULT_AUTOPLAY_INTERVAL, ScheduleKey};
pub use crate::playback::machine::{Activation, Completion, PlaybackMachine, RequestId, ShowRequest};
pub use crate::playback::state::{
    PlaybackSnapshot, PlaybackState, Quality, RenderSettings, SequenceId,
};
pub use crate::scene::catalog::{JsonCatalog, SceneCatalog, StaticCatalog};
pub use crate::scene::model::{CameraStyle, Environment, Scene, SceneDef, accept_batch};
pub use crate::scene::palette::Palette;
pub use crate::stage::frame_clock::FrameClock;
pub use crate::stage::opts::StageOpts;
pub use crate::stage::runner::{InMemorySurface, StageHandle, StageRunner, StageSurface};
pub use crate::stage::session::{ShowOutcome, Stage, StageFrame};
