//! The viewer's complete interactive vocabulary.
//!
//! Pointer gestures, window changes and programmatic calls are all
//! represented as a `ViewerCommand`. Consumers construct commands (or get
//! them from [`InputProcessor`](crate::input::InputProcessor)) and pass
//! them to [`TwinViewer::execute`](super::TwinViewer::execute).

use glam::Vec2;

/// A single viewer action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    // ── Picking ─────────────────────────────────────────────────────
    /// Pointer is at this position; updates the hover affordance.
    Hover {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },

    /// Click at this position; selects the nearest record under it.
    Select {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },

    /// Pointer left the view; clears the hover affordance.
    PointerLeave,

    // ── Camera ──────────────────────────────────────────────────────
    /// Rotate the camera by `delta` pixels of mouse movement.
    Rotate {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of mouse movement.
    Pan {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    /// Re-center the camera on the model.
    RecenterCamera,

    // ── Viewport ────────────────────────────────────────────────────
    /// The view was resized.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}
