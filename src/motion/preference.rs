use crate::host::platform::MotionPreferenceSource;

/// Reduced-motion preference captured once per activation.
///
/// The platform is queried at capture time only; a preference flipped mid-session takes effect
/// on the next activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReducedMotionGate {
    suppressed: bool,
}

impl ReducedMotionGate {
    /// Query `source` and freeze the answer. Missing platform support means motion is allowed.
    pub fn capture(source: &(impl MotionPreferenceSource + ?Sized)) -> Self {
        Self {
            suppressed: source.prefers_reduced_motion().unwrap_or(false),
        }
    }

    /// Whether computed motion must be skipped.
    pub fn is_motion_suppressed(self) -> bool {
        self.suppressed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/preference.rs"]
mod tests;
