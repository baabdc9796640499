//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient pointer state (position, press
//! and drag detection). It is the only thing that sits between raw window
//! events and [`TwinViewer::execute`](crate::viewer::TwinViewer::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::mouse::{InputState, ReleaseResult};
use crate::options::InputOptions;
use crate::viewer::ViewerCommand;

/// Converts raw window events into [`ViewerCommand`]s.
///
/// A left press and release without travel past the drag threshold is a
/// click and yields [`ViewerCommand::Select`]. Left drags orbit the
/// camera; right and middle drags pan it.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event) {
///     viewer.execute(cmd);
/// }
/// ```
#[derive(Debug)]
pub struct InputProcessor {
    state: InputState,
    drag_threshold: f32,
}

impl InputProcessor {
    /// Create a processor with the given gesture options.
    #[must_use]
    pub fn new(options: &InputOptions) -> Self {
        Self {
            state: InputState::default(),
            drag_threshold: options.drag_threshold.max(0.0),
        }
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
            InputEvent::CursorLeft => {
                self.state.cancel();
                Some(ViewerCommand::PointerLeave)
            }
            InputEvent::Resized { width, height } => {
                Some(ViewerCommand::Resize { width, height })
            }
        }
    }

    /// Cursor moved: camera drag while pressed, hover otherwise.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewerCommand> {
        let delta = self.state.handle_mouse_position(Vec2::new(x, y));

        if !self.state.is_pressed() {
            return Some(ViewerCommand::Hover { x, y });
        }

        match self.state.update_drag(self.drag_threshold)? {
            MouseButton::Left => Some(ViewerCommand::Rotate { delta }),
            MouseButton::Right | MouseButton::Middle => {
                Some(ViewerCommand::Pan { delta })
            }
        }
    }

    /// Press/release: only a clean left click selects.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewerCommand> {
        if pressed {
            self.state.handle_mouse_down(button);
            return None;
        }

        match self.state.process_mouse_up(button) {
            ReleaseResult::Click if button == MouseButton::Left => {
                let pos = self.state.mouse_pos;
                Some(ViewerCommand::Select { x: pos.x, y: pos.y })
            }
            ReleaseResult::Click
            | ReleaseResult::DragEnd
            | ReleaseResult::Ignored => None,
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(&InputOptions::default())
    }
}
