use crate::animation::ease::Ease;
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::{clamp_unit, inverse_lerp, is_finite_all, lerp};

/// Maps a scalar input range onto an output range, clamping at both ends.
///
/// `RangeMap { input: [0.0, 1.0], output: [0.0, -40.0], .. }` turns section progress into a
/// vertical drift of up to 40px. Input bounds may be given in either order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RangeMap {
    /// Input interval `[from, to]`.
    pub input: [f64; 2],
    /// Output interval `[from, to]`.
    pub output: [f64; 2],
    /// Curve applied to the normalized input position.
    #[serde(default)]
    pub ease: Ease,
}

impl RangeMap {
    /// Linear map over the unit interval.
    pub fn unit(from: f64, to: f64) -> Self {
        Self {
            input: [0.0, 1.0],
            output: [from, to],
            ease: Ease::Linear,
        }
    }

    /// Reject non-finite bounds and zero-width input intervals.
    pub fn validate(&self) -> MotionResult<()> {
        if !is_finite_all(&self.input) || !is_finite_all(&self.output) {
            return Err(MotionError::validation("range map bounds must be finite"));
        }
        if self.input[0] == self.input[1] {
            return Err(MotionError::validation(
                "range map input interval must not be empty",
            ));
        }
        Ok(())
    }

    /// Sample the map at `v`.
    pub fn sample(&self, v: f64) -> f64 {
        let t = clamp_unit(inverse_lerp(self.input[0], self.input[1], v));
        lerp(self.output[0], self.output[1], self.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/range_map.rs"]
mod tests;
