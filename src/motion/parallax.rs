use crate::foundation::core::Rect;

/// Speed coefficient used when a target does not set one.
pub const DEFAULT_SPEED: f64 = 0.18;

/// Distance below which a smoothed offset snaps to its target.
pub const SETTLE_EPSILON_PX: f64 = 0.5;

/// Stateless element-geometry to translation mapping.
pub struct ParallaxTransformer;

impl ParallaxTransformer {
    /// Vertical offset for an element whose viewport-relative box is `geometry`.
    ///
    /// `-(top * speed)`: elements below the viewport top lag behind the page, elements above
    /// it run ahead. Linear in `speed`.
    pub fn compute_offset(geometry: Rect, speed: f64) -> f64 {
        -(geometry.y0 * speed)
    }

    /// Whether any part of `geometry` lies inside a viewport of `viewport_height`.
    pub fn is_in_view(geometry: Rect, viewport_height: f64) -> bool {
        geometry.y0 < viewport_height && geometry.y1 > 0.0
    }
}

/// Exponential approach towards a moving target offset.
///
/// Each step covers `damping` of the remaining distance; `damping == 1.0` disables smoothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoother {
    damping: f64,
    current: Option<f64>,
    target: f64,
}

impl Smoother {
    /// `damping` is clamped to `(0, 1]`.
    pub fn new(damping: f64) -> Self {
        let damping = if damping.is_finite() && damping > 0.0 {
            damping.min(1.0)
        } else {
            1.0
        };
        Self {
            damping,
            current: None,
            target: 0.0,
        }
    }

    /// Advance one frame towards `target` and return the offset to show.
    ///
    /// The first step after construction or [`Smoother::reset`] jumps straight to the target.
    pub fn step(&mut self, target: f64) -> f64 {
        self.target = target;
        let next = match self.current {
            None => target,
            Some(cur) => {
                let v = cur + (target - cur) * self.damping;
                if (target - v).abs() < SETTLE_EPSILON_PX {
                    target
                } else {
                    v
                }
            }
        };
        self.current = Some(next);
        next
    }

    /// Whether further steps would still move the offset.
    pub fn is_settling(&self) -> bool {
        self.current.is_some_and(|cur| cur != self.target)
    }

    /// Last offset produced, if any.
    pub fn current(&self) -> Option<f64> {
        self.current
    }

    /// Forget the current offset.
    pub fn reset(&mut self) {
        self.current = None;
        self.target = 0.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/parallax.rs"]
mod tests;
