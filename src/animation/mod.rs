//! Easing curves and clamped range maps used by progress bindings.

/// Easing curves.
pub mod ease;
/// Clamped range-to-range mapping.
pub mod range_map;
