//! Deterministic in-memory host and scripted scenarios.
//!
//! Used by the test suite and the `scrollmotion` binary to replay a page without a real UI.

/// The simulated page.
pub mod host;
/// JSON scenarios replayed against the simulated page.
pub mod scenario;
