use std::sync::Arc;
use std::time::Duration;

use crate::camera::pose::CameraPose;
use crate::camera::trajectory::CameraTrajectory;
use crate::foundation::clock::Clock;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::VignetteResult;
use crate::narration::sink::NarrationSink;
use crate::playback::autoplay::AutoplayScheduler;
use crate::playback::machine::{Activation, Completion, PlaybackMachine, RequestId, ShowRequest};
use crate::playback::state::{PlaybackSnapshot, PlaybackState, Quality, RenderSettings};
use crate::scene::catalog::SceneCatalog;
use crate::scene::model::{Scene, SceneDef};
use crate::stage::frame_clock::FrameClock;
use crate::stage::opts::StageOpts;

/// How a show request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowOutcome {
    /// Blank topic; nothing was requested.
    Ignored,
    /// A new sequence is playing from scene 0.
    Installed {
        /// Number of scenes installed.
        scenes: usize,
    },
    /// A newer request was made before this one resolved; its result was dropped.
    Superseded,
}

/// What the renderer needs for one tick.
#[derive(Clone, Debug)]
pub struct StageFrame {
    /// Tick index.
    pub tick: FrameIndex,
    /// Stage time the pose was sampled at.
    pub elapsed_secs: f64,
    /// Camera pose to apply.
    pub pose: CameraPose,
    /// Active scene index.
    pub active: Option<usize>,
    /// Active scene.
    pub scene: Option<Arc<Scene>>,
    /// Fidelity settings for the current quality level.
    pub render: RenderSettings,
}

/// The playback hub.
///
/// Owns the state machine, the autoplay timer and the frame clock, and is the single place
/// narration is triggered from. UI calls and timer firings both go through these methods, so
/// callers on threaded runtimes must route them through one owner (see [`crate::StageRunner`]).
pub struct Stage {
    machine: PlaybackMachine,
    scheduler: AutoplayScheduler,
    frames: FrameClock,
    catalog: Arc<dyn SceneCatalog>,
    narrator: Box<dyn NarrationSink>,
    clock: Box<dyn Clock>,
    tick_secs: f64,
    shut_down: bool,
}

impl Stage {
    /// Build a stage after validating `opts`.
    pub fn new(
        opts: StageOpts,
        catalog: Arc<dyn SceneCatalog>,
        narrator: Box<dyn NarrationSink>,
        clock: Box<dyn Clock>,
    ) -> VignetteResult<Self> {
        opts.validate()?;
        let mut machine = PlaybackMachine::new();
        machine.set_autoplay(opts.autoplay);
        machine.set_narration_enabled(opts.narration_enabled);
        machine.set_quality(opts.quality);
        machine.set_language(opts.language.clone());

        let mut stage = Self {
            machine,
            scheduler: AutoplayScheduler::new(opts.autoplay_interval()),
            frames: FrameClock::new(CameraTrajectory::new(opts.camera), opts.seed),
            catalog,
            narrator,
            clock,
            tick_secs: opts.tick_fps.frame_duration_secs(),
            shut_down: false,
        };
        stage.sync_schedule();
        Ok(stage)
    }

    /// Read-only playback state.
    pub fn state(&self) -> &PlaybackState {
        self.machine.state()
    }

    /// Owned copy of the playback state.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.machine.state().snapshot()
    }

    /// The catalog shows are requested from.
    pub fn catalog(&self) -> Arc<dyn SceneCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Current time on the stage clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Next autoplay firing, if armed.
    pub fn next_autoplay_deadline(&self) -> Option<Duration> {
        self.scheduler.deadline()
    }

    /// Nominal tick length in seconds.
    pub fn tick_secs(&self) -> f64 {
        self.tick_secs
    }

    /// `true` once [`Stage::shutdown`] has run.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Request and install a show for `topic` from the configured catalog.
    ///
    /// Blank topics are ignored without consulting the catalog. Provider errors, empty results
    /// and batches with unknown camera styles come back as provider failures and leave any
    /// current show playing.
    #[tracing::instrument(skip(self))]
    pub fn start_show(&mut self, topic: &str) -> VignetteResult<ShowOutcome> {
        let Some(req) = self.begin_show(topic) else {
            return Ok(ShowOutcome::Ignored);
        };
        let result = self.catalog.provide(&req.topic);
        self.complete_show(req.id, result)
    }

    /// First half of an asynchronous show start: raise `loading` and hand out a ticket.
    pub fn begin_show(&mut self, topic: &str) -> Option<ShowRequest> {
        if self.shut_down {
            return None;
        }
        let req = self.machine.begin_show(topic);
        if req.is_none() {
            tracing::debug!("blank topic ignored");
        }
        req
    }

    /// Second half of an asynchronous show start. Only the newest ticket is applied.
    #[tracing::instrument(skip(self, result))]
    pub fn complete_show(
        &mut self,
        id: RequestId,
        result: VignetteResult<Vec<SceneDef>>,
    ) -> VignetteResult<ShowOutcome> {
        if self.shut_down {
            return Ok(ShowOutcome::Superseded);
        }
        let completion = self.machine.complete_show(id, result);
        self.sync_schedule();
        match completion {
            Ok(Completion::Installed(act)) => {
                let scenes = self.machine.state().len();
                tracing::info!(scenes, "show installed");
                self.announce(act);
                Ok(ShowOutcome::Installed { scenes })
            }
            Ok(Completion::Superseded) => Ok(ShowOutcome::Superseded),
            Err(e) => {
                tracing::warn!(error = %e, "show request failed");
                Err(e)
            }
        }
    }

    /// Activate scene `index`; `false` when out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        let act = self.machine.go_to(index);
        self.activated(act)
    }

    /// Activate the next scene (wrapping).
    pub fn next(&mut self) -> bool {
        let act = self.machine.next();
        self.activated(act)
    }

    /// Activate the previous scene (wrapping).
    pub fn previous(&mut self) -> bool {
        let act = self.machine.previous();
        self.activated(act)
    }

    /// Flip play/pause; returns the new `playing` value.
    pub fn toggle_play(&mut self) -> bool {
        let playing = self.machine.toggle_play();
        self.sync_schedule();
        playing
    }

    /// Enable or disable autoplay.
    pub fn set_autoplay(&mut self, on: bool) {
        self.machine.set_autoplay(on);
        self.sync_schedule();
    }

    /// Enable or disable narration. Disabling silences the sink immediately.
    pub fn set_narration_enabled(&mut self, on: bool) {
        self.machine.set_narration_enabled(on);
        if !on {
            self.narrator.cancel();
        }
    }

    /// Change rendering level.
    pub fn set_quality(&mut self, quality: Quality) {
        self.machine.set_quality(quality);
    }

    /// Change narration language; restarts the autoplay period.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.machine.set_language(language);
        self.sync_schedule();
    }

    /// Timer firing: advance if the timer is due and playback is still runnable.
    ///
    /// Returns `true` when a scene was advanced.
    pub fn poll_autoplay(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        let now = self.clock.now();
        if !self.scheduler.poll(now) {
            return false;
        }
        if !self.machine.autoplay_due() {
            return false;
        }
        tracing::debug!(now_ms = now.as_millis() as u64, "autoplay advance");
        self.next()
    }

    /// Run one render tick of `dt_secs`.
    pub fn tick(&mut self, dt_secs: f64) -> VignetteResult<StageFrame> {
        let state = self.machine.state();
        let scene = state.active_scene().cloned();
        let active = state.active();
        let render = state.quality().render_settings();
        let style = scene.as_ref().map(|s| s.camera_style);

        let (tick, elapsed_secs, pose) = self.frames.advance(style, dt_secs)?;
        Ok(StageFrame {
            tick,
            elapsed_secs,
            pose,
            active,
            scene,
            render,
        })
    }

    /// Run one render tick of the nominal length.
    pub fn tick_nominal(&mut self) -> VignetteResult<StageFrame> {
        self.tick(self.tick_secs)
    }

    /// Silence narration and disarm autoplay. Idempotent; also run on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.scheduler.disarm();
        self.narrator.cancel();
        tracing::debug!("stage shut down");
    }

    fn activated(&mut self, act: Option<Activation>) -> bool {
        match act {
            Some(act) => {
                self.announce(act);
                true
            }
            None => false,
        }
    }

    // Single narration call site.
    fn announce(&mut self, act: Activation) {
        tracing::debug!(index = act.index, title = %act.scene.title, style = %act.scene.camera_style, "activate");
        if self.shut_down {
            return;
        }
        let state = self.machine.state();
        if state.narration_enabled() {
            self.narrator.speak(&act.scene.narration, state.language());
        }
    }

    fn sync_schedule(&mut self) {
        if self.shut_down {
            return;
        }
        let key = self.machine.schedule_key();
        let now = self.clock.now();
        self.scheduler.sync(&key, now);
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.shutdown();
    }
}
