use crate::foundation::error::{VignetteError, VignetteResult};

pub use glam::DVec3 as Vec3;

/// Monotonic render tick counter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The tick after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Rational ticks-per-second rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> VignetteResult<Self> {
        if den == 0 {
            return Err(VignetteError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(VignetteError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Rate as floating point ticks per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one tick in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of one tick as a std duration.
    pub fn frame_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.frame_duration_secs())
    }

    /// Elapsed seconds after `frames` ticks.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Whole ticks that fit in `secs`.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    pub(crate) fn validate(self) -> VignetteResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// The leading `#` (or `0x`) is optional and digits are case-insensitive.
    pub fn from_hex(s: &str) -> VignetteResult<Self> {
        let digits = s.trim();
        let digits = digits
            .strip_prefix('#')
            .or_else(|| digits.strip_prefix("0x"))
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);

        let bad = || VignetteError::validation(format!("\"{s}\" is not a hex color"));
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map_err(|_| bad());
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());

        match digits.len() {
            3 | 4 => {
                let a = if digits.len() == 4 { nibble(3)? * 17 } else { 255 };
                Ok(Self {
                    r: nibble(0)? * 17,
                    g: nibble(1)? * 17,
                    b: nibble(2)? * 17,
                    a,
                })
            }
            6 | 8 => {
                let a = if digits.len() == 8 { byte(6)? } else { 255 };
                Ok(Self {
                    r: byte(0)?,
                    g: byte(2)?,
                    b: byte(4)?,
                    a,
                })
            }
            _ => Err(bad()),
        }
    }

    /// Lowercase `#rrggbb` form (alpha appended only when not opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
