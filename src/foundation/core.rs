use std::fmt;

pub use kurbo::{Rect, Vec2};

/// Index of a frame in a frame-addressable timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Host-side name of a visual element (a section, a card, a sticky stage).
///
/// The host resolves ids to its own element references; this crate only compares and forwards
/// them.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Build an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual state written to an element: a translation and an opacity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementTransform {
    /// Translation in CSS pixels.
    pub translate: Vec2,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl ElementTransform {
    /// The resting state: no offset, fully opaque.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        opacity: 1.0,
    };

    /// A pure vertical translation.
    pub fn translate_y(offset: f64) -> Self {
        Self {
            translate: Vec2::new(0.0, offset),
            ..Self::IDENTITY
        }
    }

    /// Whether this transform is visually neutral.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Express the transform as an affine for hosts that composite themselves.
    pub fn to_affine(self) -> kurbo::Affine {
        kurbo::Affine::translate(self.translate)
    }
}

impl Default for ElementTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
