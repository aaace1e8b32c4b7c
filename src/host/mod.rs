//! Host collaborator traits.
//!
//! A host is whatever owns the real page: a browser binding, a native UI toolkit, or the
//! in-memory [`crate::SimulatedHost`]. Sections call into it to read layout, write transforms,
//! register for scroll and refresh notifications and drive the timeline resource.

/// Collaborator traits and the handle types they exchange.
pub mod platform;
