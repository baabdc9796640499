//! Camera system for viewing the twin.
//!
//! Provides a perspective camera that produces pick rays, and an orbital
//! controller with rotation, panning, zoom, and fit-to-model.

/// Orbital camera controller.
pub mod controller;
/// Core camera struct and pick-ray construction.
pub mod core;

pub use self::controller::OrbitCamera;
pub use self::core::Camera;
