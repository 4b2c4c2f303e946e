use crate::camera::pose::CameraPose;
use crate::camera::trajectory::CameraTrajectory;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{VignetteError, VignetteResult};
use crate::foundation::math::Rng64;
use crate::scene::model::CameraStyle;

/// Per-tick camera driver.
///
/// Runs one continuous clock from construction; scene changes do not reset the phase. Each
/// tick samples the trajectory at the current elapsed time and then advances it, so the first
/// tick is evaluated at `t = 0`.
#[derive(Clone, Debug)]
pub struct FrameClock {
    trajectory: CameraTrajectory,
    rng: Rng64,
    tick: FrameIndex,
    elapsed: f64,
    pose: CameraPose,
}

impl FrameClock {
    /// Clock at `t = 0` with the default pose.
    pub fn new(trajectory: CameraTrajectory, seed: u64) -> Self {
        Self {
            trajectory,
            rng: Rng64::new(seed),
            tick: FrameIndex(0),
            elapsed: 0.0,
            pose: CameraPose::default(),
        }
    }

    /// Index of the next tick.
    pub fn tick_index(&self) -> FrameIndex {
        self.tick
    }

    /// Seconds of stage time elapsed.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    /// Pose from the most recent tick.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Run one tick for `style` and advance the clock by `dt_secs`.
    ///
    /// With no style (empty stage) the pose holds still. A non-finite pose or delta is an
    /// invariant violation and is reported rather than rendered.
    pub fn advance(
        &mut self,
        style: Option<CameraStyle>,
        dt_secs: f64,
    ) -> VignetteResult<(FrameIndex, f64, CameraPose)> {
        if !(dt_secs.is_finite() && dt_secs >= 0.0) {
            return Err(VignetteError::evaluation(format!(
                "tick delta must be finite and >= 0, got {dt_secs}"
            )));
        }
        let t = self.elapsed;
        if let Some(style) = style {
            let next = self.trajectory.step(style, t, &self.pose, &mut self.rng);
            if !next.is_finite() {
                return Err(VignetteError::evaluation(format!(
                    "{style} produced a non-finite pose at t={t}"
                )));
            }
            self.pose = next;
        }
        let idx = self.tick;
        self.tick = self.tick.next();
        self.elapsed += dt_secs;
        tracing::trace!(tick = idx.0, t, "frame");
        Ok((idx, t, self.pose))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/frame_clock.rs"]
mod tests;
