use crate::animation::range_map::RangeMap;
use crate::foundation::core::ElementId;
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::platform::{InViewOptions, ScrollContainer};
use crate::motion::parallax::DEFAULT_SPEED;
use crate::motion::progress::ScrollOffsets;
use std::collections::BTreeSet;

/// Declarative description of one scroll-driven section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    /// Element whose geometry defines the scroll region.
    pub region: ElementId,
    /// Scroller the section listens to.
    #[serde(default)]
    pub container: ScrollContainer,
    /// Where progress starts and ends.
    #[serde(default)]
    pub offsets: ScrollOffsets,
    /// Elements translated by their own geometry.
    #[serde(default)]
    pub parallax: Vec<ParallaxTargetConfig>,
    /// Elements driven by section progress.
    #[serde(default)]
    pub bindings: Vec<ProgressBinding>,
    /// Timeline scrubbed by section progress.
    #[serde(default)]
    pub timeline: Option<TimelineConfig>,
    /// Options for the one-shot entry visibility check.
    #[serde(default)]
    pub entry: InViewOptions,
}

/// One parallax element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxTargetConfig {
    /// Translated element.
    pub element: ElementId,
    /// Dimensionless speed coefficient, typically in `[0, 1]`.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Fraction of the remaining distance covered per frame; `1.0` means no smoothing.
    #[serde(default = "default_damping")]
    pub damping: f64,
}

impl ParallaxTargetConfig {
    /// An unsmoothed target.
    pub fn new(element: impl Into<String>, speed: f64) -> Self {
        Self {
            element: ElementId::new(element),
            speed,
            damping: default_damping(),
        }
    }
}

/// Progress-driven visual properties of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressBinding {
    /// Driven element.
    pub element: ElementId,
    /// Progress to vertical translation (pixels).
    #[serde(default)]
    pub translate_y: Option<RangeMap>,
    /// Progress to opacity; samples are clamped to `[0, 1]`.
    #[serde(default)]
    pub opacity: Option<RangeMap>,
}

/// Scrubbed timeline resource.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    /// Identifier handed to the loader.
    pub source: String,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_damping() -> f64 {
    1.0
}

impl SectionConfig {
    /// A section over `region` with default offsets and nothing attached.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: ElementId::new(region),
            container: ScrollContainer::Window,
            offsets: ScrollOffsets::default(),
            parallax: Vec::new(),
            bindings: Vec::new(),
            timeline: None,
            entry: InViewOptions::default(),
        }
    }

    /// Parse and validate a JSON description.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the configuration before anything is registered with the host.
    pub fn validate(&self) -> MotionResult<()> {
        if self.region.as_str().is_empty() {
            return Err(MotionError::validation("section region id must not be empty"));
        }
        if let ScrollContainer::Element(el) = &self.container
            && el.as_str().is_empty()
        {
            return Err(MotionError::validation(
                "scroll container element id must not be empty",
            ));
        }
        self.offsets.validate()?;
        if !self.entry.margin.is_finite() {
            return Err(MotionError::validation("entry margin must be finite"));
        }

        let mut seen = BTreeSet::new();
        for t in &self.parallax {
            if !seen.insert(&t.element) {
                return Err(MotionError::validation(format!(
                    "element '{}' is driven more than once",
                    t.element
                )));
            }
            if !t.speed.is_finite() {
                return Err(MotionError::validation(format!(
                    "parallax speed for '{}' must be finite",
                    t.element
                )));
            }
            if !(t.damping > 0.0 && t.damping <= 1.0) {
                return Err(MotionError::validation(format!(
                    "parallax damping for '{}' must be in (0, 1]",
                    t.element
                )));
            }
        }
        for b in &self.bindings {
            if !seen.insert(&b.element) {
                return Err(MotionError::validation(format!(
                    "element '{}' is driven more than once",
                    b.element
                )));
            }
            if b.translate_y.is_none() && b.opacity.is_none() {
                return Err(MotionError::validation(format!(
                    "binding for '{}' drives nothing",
                    b.element
                )));
            }
            for map in [&b.translate_y, &b.opacity].into_iter().flatten() {
                map.validate()?;
            }
        }
        if let Some(tl) = &self.timeline
            && tl.source.trim().is_empty()
        {
            return Err(MotionError::validation("timeline source must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/config.rs"]
mod tests;
