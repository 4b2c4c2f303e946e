use crate::foundation::core::Vec3;

/// Small seedable generator (SplitMix64) used wherever the engine needs jitter.
///
/// Every stochastic path takes one of these by `&mut` so tests can replay a run from its seed.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[-amp, amp)`.
    pub fn symmetric(&mut self, amp: f64) -> f64 {
        (self.next_f64_01() * 2.0 - 1.0) * amp
    }
}

/// One exponential smoothing step: `current + (target - current) * k`.
pub(crate) fn approach(current: Vec3, target: Vec3, k: f64) -> Vec3 {
    current + (target - current) * k
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
