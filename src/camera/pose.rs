use crate::foundation::core::Vec3;

/// Camera placement for one tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Roll around the view axis, radians.
    pub roll: f64,
}

impl CameraPose {
    /// Pose at `position` looking at `look_at` with no roll.
    pub fn looking_at(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            look_at,
            roll: 0.0,
        }
    }

    /// `true` when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite() && self.roll.is_finite()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 1.5, 5.0), Vec3::new(0.0, 1.0, 0.0))
    }
}
