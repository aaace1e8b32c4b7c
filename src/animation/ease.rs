/// Easing curves applied to progress before it is mapped onto an output range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Output follows progress exactly.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quintic ease-out, close to the `cubic-bezier(0.22, 1, 0.36, 1)` curve used for reveals.
    OutQuint,
}

#[derive(Clone, Copy)]
enum Shape {
    In,
    Out,
    InOut,
}

impl Ease {
    fn power(self) -> Option<(Shape, i32)> {
        match self {
            Self::Linear => None,
            Self::InQuad => Some((Shape::In, 2)),
            Self::OutQuad => Some((Shape::Out, 2)),
            Self::InOutQuad => Some((Shape::InOut, 2)),
            Self::InCubic => Some((Shape::In, 3)),
            Self::OutCubic => Some((Shape::Out, 3)),
            Self::InOutCubic => Some((Shape::InOut, 3)),
            Self::OutQuint => Some((Shape::Out, 5)),
        }
    }

    /// Reshape section progress before a binding maps it onto its output range.
    ///
    /// Progress outside `[0, 1]` is clamped first, so every curve starts at `0` and ends at `1`.
    pub fn apply(self, progress: f64) -> f64 {
        let t = crate::foundation::math::clamp_unit(progress);
        let Some((shape, n)) = self.power() else {
            return t;
        };
        match shape {
            Shape::In => t.powi(n),
            Shape::Out => 1.0 - (1.0 - t).powi(n),
            // Two half-curves joined at (0.5, 0.5).
            Shape::InOut if t < 0.5 => (2.0 * t).powi(n) / 2.0,
            Shape::InOut => 1.0 - (2.0 - 2.0 * t).powi(n) / 2.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
