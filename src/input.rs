use glium::glutin::event::{ElementState, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};

use crate::game::Action;
use crate::layout::Layout;

/// Input that happened since the last frame.
#[derive(Debug, Default, Clone)]
pub struct Input {
    /// Position of the mouse cursor in physical pixels.
    cursor_pos: Option<(f64, f64)>,
    /// Left mouse button was pressed.
    primary: bool,
    /// Right mouse button was pressed.
    secondary: bool,
    /// Restart key was pressed.
    restart: bool,
}
impl Input {
    /// Records a window event.
    pub fn handle_event(&mut self, ev: &WindowEvent<'_>) {
        match ev {
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor_pos(Some((position.x, position.y)));
            }
            WindowEvent::CursorLeft { .. } => self.set_cursor_pos(None),

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => match button {
                MouseButton::Left => self.press_primary(),
                MouseButton::Right => self.press_secondary(),
                _ => (),
            },

            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(VirtualKeyCode::R),
                        ..
                    },
                ..
            } => self.press_restart(),

            _ => (),
        }
    }

    /// Moves the cursor.
    pub fn set_cursor_pos(&mut self, pos: Option<(f64, f64)>) {
        self.cursor_pos = pos;
    }
    /// Records a reveal click.
    pub fn press_primary(&mut self) {
        self.primary = true;
    }
    /// Records a flag click.
    pub fn press_secondary(&mut self) {
        self.secondary = true;
    }
    /// Records a press of the restart key.
    pub fn press_restart(&mut self) {
        self.restart = true;
    }

    /// Returns the actions for this frame and clears the button presses.
    ///
    /// Clicks in the margin before the first cell produce no action. The
    /// restart seed is only requested if the restart key was pressed.
    pub fn take_actions(&mut self, layout: Layout, seed: impl FnOnce() -> u64) -> Vec<Action> {
        let mut actions = vec![];
        let cell = self.cursor_pos.and_then(|pixel| layout.pixel_to_cell(pixel));
        if let Some(pos) = cell {
            if self.primary {
                actions.push(Action::Reveal(pos));
            }
            if self.secondary {
                actions.push(Action::ToggleFlag(pos));
            }
        }
        if self.restart {
            actions.push(Action::Restart { seed: seed() });
        }

        self.primary = false;
        self.secondary = false;
        self.restart = false;
        actions
    }
}
