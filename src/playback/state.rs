use std::sync::Arc;

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::scene::model::Scene;

/// Default narration language tag.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Identity of an installed sequence. Bumped on every install; `0` means nothing installed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct SequenceId(pub u64);

/// Rendering fidelity level. Never consulted by scheduling.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    /// Ordinal 0.
    Low,
    /// Ordinal 1.
    #[default]
    Medium,
    /// Ordinal 2.
    High,
}

impl Quality {
    /// Ordinal value in `0..=2`.
    pub fn level(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Renderer settings for this level.
    pub fn render_settings(self) -> RenderSettings {
        match self {
            Self::Low => RenderSettings {
                pixel_ratio: 1.0,
                light_intensity: 0.8,
                shadows: false,
            },
            Self::Medium => RenderSettings {
                pixel_ratio: 1.5,
                light_intensity: 1.0,
                shadows: true,
            },
            Self::High => RenderSettings {
                pixel_ratio: 2.0,
                light_intensity: 1.25,
                shadows: true,
            },
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = VignetteError;

    fn try_from(v: u8) -> VignetteResult<Self> {
        match v {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            _ => Err(VignetteError::validation(format!(
                "quality must be 0, 1 or 2, got {v}"
            ))),
        }
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.level()
    }
}

/// Presentation knobs derived from [`Quality`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RenderSettings {
    /// Device pixel ratio cap.
    pub pixel_ratio: f32,
    /// Key light multiplier.
    pub light_intensity: f64,
    /// Whether shadow maps are enabled.
    pub shadows: bool,
}

/// Everything the playback machine owns.
///
/// Fields are read through accessors; only [`crate::PlaybackMachine`] writes them.
#[derive(Clone, Debug)]
pub struct PlaybackState {
    pub(crate) sequence: Vec<Arc<Scene>>,
    pub(crate) sequence_id: SequenceId,
    pub(crate) active: Option<usize>,
    pub(crate) playing: bool,
    pub(crate) autoplay: bool,
    pub(crate) narration_enabled: bool,
    pub(crate) quality: Quality,
    pub(crate) loading: bool,
    pub(crate) language: String,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            sequence: Vec::new(),
            sequence_id: SequenceId::default(),
            active: None,
            playing: false,
            autoplay: true,
            narration_enabled: true,
            quality: Quality::default(),
            loading: false,
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

impl PlaybackState {
    /// Installed scenes in order.
    pub fn sequence(&self) -> &[Arc<Scene>] {
        &self.sequence
    }

    /// Identity of the installed sequence.
    pub fn sequence_id(&self) -> SequenceId {
        self.sequence_id
    }

    /// Number of installed scenes.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// `true` while no sequence is installed.
    pub fn is_idle(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Active index; `None` exactly when idle.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The active scene.
    pub fn active_scene(&self) -> Option<&Arc<Scene>> {
        self.active.and_then(|i| self.sequence.get(i))
    }

    /// Whether playback is running.
    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Whether the autoplay timer may advance scenes.
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Whether activations speak.
    pub fn narration_enabled(&self) -> bool {
        self.narration_enabled
    }

    /// Rendering level.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// `true` between a show request and its resolution.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Narration language tag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Owned summary for presentation and logging.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            sequence_id: self.sequence_id,
            scenes: self.sequence.len(),
            active: self.active,
            title: self.active_scene().map(|s| s.title.clone()),
            playing: self.playing,
            autoplay: self.autoplay,
            narration_enabled: self.narration_enabled,
            quality: self.quality,
            loading: self.loading,
            language: self.language.clone(),
        }
    }
}

/// Point-in-time copy of [`PlaybackState`] without the scenes themselves.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[allow(missing_docs)]
pub struct PlaybackSnapshot {
    pub sequence_id: SequenceId,
    pub scenes: usize,
    pub active: Option<usize>,
    pub title: Option<String>,
    pub playing: bool,
    pub autoplay: bool,
    pub narration_enabled: bool,
    pub quality: Quality,
    pub loading: bool,
    pub language: String,
}
