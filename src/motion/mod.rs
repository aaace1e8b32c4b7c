//! Scroll-to-motion building blocks.
//!
//! Each component is usable on its own; [`crate::Section`] wires them together.

/// Per-element parallax offsets and smoothing.
pub mod parallax;
/// Reduced-motion capture.
pub mod preference;
/// Scroll region geometry and progress.
pub mod progress;
/// Display-refresh coalescing.
pub mod scheduler;
/// Timeline scrubbing state machine.
pub mod timeline;
