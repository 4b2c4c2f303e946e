use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::camera::trajectory::TrajectoryParams;
use crate::foundation::core::Fps;
use crate::foundation::error::{VignetteError, VignetteResult};
use crate::playback::state::{DEFAULT_LANGUAGE, Quality};

/// Options for a [`crate::Stage`].
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageOpts {
    /// Autoplay period in milliseconds.
    pub autoplay_interval_ms: u64,
    /// Nominal render tick rate.
    pub tick_fps: Fps,
    /// Narration language tag.
    pub language: String,
    /// Initial autoplay flag.
    pub autoplay: bool,
    /// Initial narration flag.
    pub narration_enabled: bool,
    /// Initial rendering level.
    pub quality: Quality,
    /// Seed for handheld jitter.
    pub seed: u64,
    /// Camera trajectory constants.
    pub camera: TrajectoryParams,
}

impl Default for StageOpts {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 6800,
            tick_fps: Fps { num: 60, den: 1 },
            language: DEFAULT_LANGUAGE.to_owned(),
            autoplay: true,
            narration_enabled: true,
            quality: Quality::Medium,
            seed: 0,
            camera: TrajectoryParams::default(),
        }
    }
}

impl StageOpts {
    /// Parse options from a JSON reader and validate them.
    pub fn from_reader<R: std::io::Read>(r: R) -> VignetteResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| VignetteError::serde(format!("parse stage options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file and validate them.
    pub fn from_path(path: impl AsRef<Path>) -> VignetteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VignetteError::validation(format!("open stage options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check option ranges.
    pub fn validate(&self) -> VignetteResult<()> {
        if self.autoplay_interval_ms == 0 {
            return Err(VignetteError::validation(
                "autoplay_interval_ms must be > 0",
            ));
        }
        self.tick_fps.validate()?;
        if self.language.trim().is_empty() {
            return Err(VignetteError::validation("language must not be blank"));
        }
        self.camera.validate()
    }

    /// Autoplay period as a duration.
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/opts.rs"]
mod tests;
