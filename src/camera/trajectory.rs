use crate::camera::pose::CameraPose;
use crate::foundation::core::Vec3;
use crate::foundation::error::{VignetteError, VignetteResult};
use crate::foundation::math::{Rng64, approach};
use crate::scene::model::CameraStyle;

/// Constants shaping every camera style.
///
/// Angular rates are radians per second of stage time. Smoothing factors are per tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrajectoryParams {
    /// Look target shared by the framed styles.
    pub focus: Vec3,

    /// Dolly anchor distance along +Z.
    pub dolly_anchor_z: f64,
    /// Dolly oscillation half-range.
    pub dolly_amplitude: f64,
    /// Dolly oscillation rate.
    pub dolly_rate: f64,
    /// Dolly eye height.
    pub dolly_height: f64,

    /// Crane sideways sway amplitude.
    pub crane_sway: f64,
    /// Crane sway rate.
    pub crane_sway_rate: f64,
    /// Crane mean height.
    pub crane_base_height: f64,
    /// Crane rise amplitude.
    pub crane_rise: f64,
    /// Crane rise rate.
    pub crane_rise_rate: f64,
    /// Crane distance along +Z.
    pub crane_z: f64,

    /// Orbit radius.
    pub orbit_radius: f64,
    /// Orbit eye height.
    pub orbit_height: f64,
    /// Orbit angular rate.
    pub orbit_rate: f64,

    /// Where locked-off settles.
    pub locked_position: Vec3,

    /// Blend factor for dolly-in, push-pull and crane-up.
    pub follow_smoothing: f64,
    /// Blend factor for locked-off.
    pub locked_smoothing: f64,

    /// Per-axis position jitter for handheld.
    pub handheld_position_jitter: f64,
    /// Roll jitter for handheld, radians.
    pub handheld_roll_jitter: f64,
}

impl Default for TrajectoryParams {
    fn default() -> Self {
        Self {
            focus: Vec3::new(0.0, 1.0, 0.0),
            dolly_anchor_z: 4.0,
            dolly_amplitude: 0.4,
            dolly_rate: 0.25,
            dolly_height: 1.5,
            crane_sway: 0.6,
            crane_sway_rate: 0.3,
            crane_base_height: 2.0,
            crane_rise: 1.0,
            crane_rise_rate: 0.15,
            crane_z: 5.0,
            orbit_radius: 6.0,
            orbit_height: 2.5,
            orbit_rate: 0.1,
            locked_position: Vec3::new(0.0, 1.6, 5.0),
            follow_smoothing: 0.02,
            locked_smoothing: 0.08,
            handheld_position_jitter: 0.01,
            handheld_roll_jitter: 0.002,
        }
    }
}

impl TrajectoryParams {
    /// Check the constants can produce finite, non-overshooting motion.
    pub fn validate(&self) -> VignetteResult<()> {
        for (name, k) in [
            ("follow_smoothing", self.follow_smoothing),
            ("locked_smoothing", self.locked_smoothing),
        ] {
            if !k.is_finite() || k <= 0.0 || k > 1.0 {
                return Err(VignetteError::validation(format!(
                    "camera.{name} must be in (0, 1], got {k}"
                )));
            }
        }
        if !(self.orbit_radius.is_finite() && self.orbit_radius > 0.0) {
            return Err(VignetteError::validation(
                "camera.orbit_radius must be finite and > 0",
            ));
        }
        if self.handheld_position_jitter < 0.0 || self.handheld_roll_jitter < 0.0 {
            return Err(VignetteError::validation(
                "camera handheld jitter amplitudes must be >= 0",
            ));
        }
        if !self.focus.is_finite() || !self.locked_position.is_finite() {
            return Err(VignetteError::validation(
                "camera.focus and camera.locked_position must be finite",
            ));
        }
        Ok(())
    }
}

/// Maps `(style, elapsed, previous pose)` to the next pose.
#[derive(Clone, Copy, Debug, Default)]
pub struct CameraTrajectory {
    params: TrajectoryParams,
}

impl CameraTrajectory {
    /// Trajectory using `params`.
    pub fn new(params: TrajectoryParams) -> Self {
        Self { params }
    }

    /// Constants in use.
    pub fn params(&self) -> &TrajectoryParams {
        &self.params
    }

    /// Compute the pose for the tick at elapsed time `t` seconds.
    ///
    /// Only [`CameraStyle::Handheld`] draws from `rng`; every other style is a pure function of
    /// its inputs.
    pub fn step(
        &self,
        style: CameraStyle,
        t: f64,
        prev: &CameraPose,
        rng: &mut Rng64,
    ) -> CameraPose {
        let p = &self.params;
        match style {
            // push-pull shares the dolly path.
            CameraStyle::DollyIn | CameraStyle::PushPull => {
                self.follow(prev, self.dolly_target(t), p.follow_smoothing)
            }
            CameraStyle::CraneUp => self.follow(prev, self.crane_target(t), p.follow_smoothing),
            CameraStyle::OrbitSlow => CameraPose::looking_at(self.orbit_position(t), p.focus),
            CameraStyle::Handheld => CameraPose {
                position: prev.position
                    + Vec3::new(
                        rng.symmetric(p.handheld_position_jitter),
                        rng.symmetric(p.handheld_position_jitter),
                        rng.symmetric(p.handheld_position_jitter),
                    ),
                look_at: prev.look_at,
                roll: prev.roll + rng.symmetric(p.handheld_roll_jitter),
            },
            CameraStyle::LockedOff => self.follow(prev, p.locked_position, p.locked_smoothing),
        }
    }

    /// Dolly target at time `t`.
    pub fn dolly_target(&self, t: f64) -> Vec3 {
        let p = &self.params;
        Vec3::new(
            0.0,
            p.dolly_height,
            p.dolly_anchor_z + p.dolly_amplitude * (p.dolly_rate * t).cos(),
        )
    }

    /// Crane target at time `t`.
    pub fn crane_target(&self, t: f64) -> Vec3 {
        let p = &self.params;
        Vec3::new(
            p.crane_sway * (p.crane_sway_rate * t).sin(),
            p.crane_base_height + p.crane_rise * (p.crane_rise_rate * t).sin(),
            p.crane_z,
        )
    }

    /// Orbit eye position at time `t`.
    pub fn orbit_position(&self, t: f64) -> Vec3 {
        let p = &self.params;
        let a = p.orbit_rate * t;
        Vec3::new(
            p.orbit_radius * a.sin(),
            p.orbit_height,
            p.orbit_radius * a.cos(),
        )
    }

    // Smoothed styles also ease the look target and roll back to level.
    fn follow(&self, prev: &CameraPose, target: Vec3, k: f64) -> CameraPose {
        CameraPose {
            position: approach(prev.position, target, k),
            look_at: approach(prev.look_at, self.params.focus, k),
            roll: prev.roll + (0.0 - prev.roll) * k,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/trajectory.rs"]
mod tests;
