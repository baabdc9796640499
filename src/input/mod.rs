//! Input handling: event types, pointer state, and the input processor
//! that converts raw window events into viewer commands.

/// Platform-agnostic input events.
pub mod event;
/// Pointer position and press / drag tracking.
pub(crate) mod mouse;
/// Converts raw events into viewer commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::InputProcessor;
