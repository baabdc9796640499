use glam::Vec2;

use super::event::MouseButton;

/// Result of releasing a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReleaseResult {
    /// Press and release without significant travel.
    Click,
    /// The press turned into a drag; no click.
    DragEnd,
    /// Release of a button that was not the one pressed.
    Ignored,
}

/// Tracks pointer position and press / drag state.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub(crate) mouse_pos: Vec2,
    pressed: Option<PressState>,
}

#[derive(Debug, Clone, Copy)]
struct PressState {
    button: MouseButton,
    origin: Vec2,
    dragging: bool,
}

impl InputState {
    /// Update cursor position, returning the delta from the last one.
    pub(crate) fn handle_mouse_position(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;
        delta
    }

    /// Record a press at the current position. A second button pressed
    /// while one is held is ignored.
    pub(crate) fn handle_mouse_down(&mut self, button: MouseButton) {
        if self.pressed.is_none() {
            self.pressed = Some(PressState {
                button,
                origin: self.mouse_pos,
                dragging: false,
            });
        }
    }

    /// Mark the press as a drag once the pointer has travelled more than
    /// `threshold` pixels from where it went down. Returns the held button
    /// while dragging.
    pub(crate) fn update_drag(&mut self, threshold: f32) -> Option<MouseButton> {
        let press = self.pressed.as_mut()?;
        if !press.dragging && press.origin.distance(self.mouse_pos) > threshold {
            press.dragging = true;
        }
        press.dragging.then_some(press.button)
    }

    /// Whether any button is held.
    pub(crate) fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    /// Process a release of `button`.
    pub(crate) fn process_mouse_up(&mut self, button: MouseButton) -> ReleaseResult {
        match self.pressed {
            Some(press) if press.button == button => {
                self.pressed = None;
                if press.dragging {
                    ReleaseResult::DragEnd
                } else {
                    ReleaseResult::Click
                }
            }
            _ => ReleaseResult::Ignored,
        }
    }

    /// Drop any press without producing a click.
    pub(crate) fn cancel(&mut self) {
        self.pressed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_jitter_is_still_a_click() {
        let mut state = InputState::default();
        let _ = state.handle_mouse_position(Vec2::new(10.0, 10.0));
        state.handle_mouse_down(MouseButton::Left);
        let _ = state.handle_mouse_position(Vec2::new(11.0, 11.0));
        assert_eq!(state.update_drag(3.0), None);
        assert_eq!(state.process_mouse_up(MouseButton::Left), ReleaseResult::Click);
        assert!(!state.is_pressed());
    }

    #[test]
    fn travel_past_threshold_is_a_drag() {
        let mut state = InputState::default();
        state.handle_mouse_down(MouseButton::Left);
        let _ = state.handle_mouse_position(Vec2::new(5.0, 0.0));
        assert_eq!(state.update_drag(3.0), Some(MouseButton::Left));
        // Coming back does not turn it into a click again
        let _ = state.handle_mouse_position(Vec2::ZERO);
        assert_eq!(state.update_drag(3.0), Some(MouseButton::Left));
        assert_eq!(
            state.process_mouse_up(MouseButton::Left),
            ReleaseResult::DragEnd
        );
    }

    #[test]
    fn mismatched_release_is_ignored() {
        let mut state = InputState::default();
        state.handle_mouse_down(MouseButton::Right);
        assert_eq!(
            state.process_mouse_up(MouseButton::Left),
            ReleaseResult::Ignored
        );
        assert!(state.is_pressed());
        state.cancel();
        assert!(!state.is_pressed());
    }
}
