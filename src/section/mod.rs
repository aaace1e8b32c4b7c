//! Section wiring: configuration and the activate/deactivate lifecycle.

/// Declarative section description.
pub mod config;
/// The live section and its frame loop.
pub mod lifecycle;
