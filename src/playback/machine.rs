use std::sync::Arc;

use crate::foundation::error::VignetteResult;
use crate::playback::autoplay::ScheduleKey;
use crate::playback::state::{PlaybackState, Quality, SequenceId};
use crate::scene::model::{Scene, SceneDef, accept_batch};

/// Ticket for an outstanding show request. Only the newest ticket can install a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct RequestId(pub u64);

/// A show request that has been accepted and is waiting for catalog results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowRequest {
    /// Ticket to hand back with the result.
    pub id: RequestId,
    /// Trimmed topic to look up.
    pub topic: String,
}

/// A scene becoming the active one.
#[derive(Clone, Debug)]
pub struct Activation {
    /// New active index.
    pub index: usize,
    /// The scene now active.
    pub scene: Arc<Scene>,
}

/// Result of handing catalog output back to the machine.
#[derive(Clone, Debug)]
pub enum Completion {
    /// A newer request is outstanding (or none is); the result was discarded.
    Superseded,
    /// The sequence was installed and scene 0 activated.
    Installed(Activation),
}

/// Playback state machine.
///
/// Transitions are pure state updates that report the activation they caused; acting on an
/// activation (narration) is left to the caller so this type never touches a speech device.
#[derive(Clone, Debug, Default)]
pub struct PlaybackMachine {
    state: PlaybackState,
    last_request: u64,
    pending: Option<RequestId>,
}

impl PlaybackMachine {
    /// Idle machine with default flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Accept a show request for `topic`.
    ///
    /// Blank topics return `None` and change nothing. Otherwise `loading` is raised and any
    /// earlier outstanding request is superseded.
    pub fn begin_show(&mut self, topic: &str) -> Option<ShowRequest> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }
        self.last_request += 1;
        let id = RequestId(self.last_request);
        if let Some(prev) = self.pending.replace(id) {
            tracing::debug!(prev = prev.0, next = id.0, "show request superseded");
        }
        self.state.loading = true;
        Some(ShowRequest {
            id,
            topic: topic.to_owned(),
        })
    }

    /// Resolve request `id` with catalog output.
    ///
    /// Stale results are discarded. For the current request, `loading` drops and either the whole
    /// batch is installed or the previous state is left untouched and a provider failure is
    /// returned.
    pub fn complete_show(
        &mut self,
        id: RequestId,
        result: VignetteResult<Vec<SceneDef>>,
    ) -> VignetteResult<Completion> {
        if self.pending != Some(id) {
            tracing::warn!(request = id.0, "discarding stale show result");
            return Ok(Completion::Superseded);
        }
        self.pending = None;
        self.state.loading = false;

        let defs = result.map_err(|e| e.into_provider())?;
        let scenes = accept_batch(&defs)?;
        Ok(Completion::Installed(self.install(scenes)))
    }

    fn install(&mut self, scenes: Vec<Scene>) -> Activation {
        self.state.sequence = scenes.into_iter().map(Arc::new).collect();
        self.state.sequence_id = SequenceId(self.state.sequence_id.0 + 1);
        self.state.playing = true;
        self.state.active = Some(0);
        Activation {
            index: 0,
            scene: Arc::clone(&self.state.sequence[0]),
        }
    }

    /// Activate scene `index`. Out-of-range indices are ignored.
    ///
    /// Re-selecting the active scene is a fresh activation.
    pub fn go_to(&mut self, index: usize) -> Option<Activation> {
        let Some(scene) = self.state.sequence.get(index) else {
            tracing::debug!(index, len = self.state.len(), "go_to out of range, ignored");
            return None;
        };
        let scene = Arc::clone(scene);
        self.state.active = Some(index);
        Some(Activation { index, scene })
    }

    /// Activate the following scene, wrapping to the start.
    pub fn next(&mut self) -> Option<Activation> {
        let len = self.state.len();
        let active = self.state.active?;
        self.go_to((active + 1) % len)
    }

    /// Activate the preceding scene, wrapping to the end.
    pub fn previous(&mut self) -> Option<Activation> {
        let len = self.state.len();
        let active = self.state.active?;
        self.go_to((active + len - 1) % len)
    }

    /// Flip `playing`; returns the new value.
    pub fn toggle_play(&mut self) -> bool {
        self.state.playing = !self.state.playing;
        self.state.playing
    }

    /// Set the autoplay flag.
    pub fn set_autoplay(&mut self, on: bool) {
        self.state.autoplay = on;
    }

    /// Set the narration flag.
    pub fn set_narration_enabled(&mut self, on: bool) {
        self.state.narration_enabled = on;
    }

    /// Set the rendering level.
    pub fn set_quality(&mut self, quality: Quality) {
        self.state.quality = quality;
    }

    /// Set the narration language tag.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.state.language = language.into();
    }

    /// Whether a timer firing right now should advance.
    pub fn autoplay_due(&self) -> bool {
        self.state.playing && self.state.autoplay && !self.state.is_idle()
    }

    /// The inputs the autoplay timer is armed against.
    pub fn schedule_key(&self) -> ScheduleKey {
        ScheduleKey {
            sequence: self.state.sequence_id,
            playing: self.state.playing,
            autoplay: self.state.autoplay,
            language: self.state.language.clone(),
            runnable: self.autoplay_due(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/machine.rs"]
mod tests;
