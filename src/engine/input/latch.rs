// Input latch
//
// Movement and attack are level-triggered (held), jump is edge-triggered:
// the press sets `jump_requested` and only the game loop clears it after
// consuming it, so a tap between frames is never lost.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

use super::{action_for_key, Action, PLAYER_COUNT};

/// Per-player latched button state
#[derive(Debug, Clone, Copy, Default)]
pub struct PadState {
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    /// Set on jump key press, cleared only by the game loop
    pub jump_requested: bool,
}

#[derive(Debug, Default)]
pub struct InputLatch {
    pads: [PadState; PLAYER_COUNT],
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pad(&self, player: usize) -> &PadState {
        &self.pads[player]
    }

    /// Route a winit keyboard event to the owning player's pad.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some((player, action)) = action_for_key(code) else {
            return;
        };
        self.apply(player, action, event.state == ElementState::Pressed, event.repeat);
    }

    pub fn apply(&mut self, player: usize, action: Action, pressed: bool, repeat: bool) {
        let pad = &mut self.pads[player];
        match action {
            Action::MoveLeft => pad.left = pressed,
            Action::MoveRight => pad.right = pressed,
            Action::Attack => pad.attack = pressed,
            Action::Jump => {
                // OS auto-repeat must not re-arm the request
                if pressed && !repeat {
                    pad.jump_requested = true;
                }
            }
        }
    }

    /// Consume the pending jump edges. Called once per frame after the
    /// requests have been acted on.
    pub fn clear_jump_requests(&mut self) {
        for pad in &mut self.pads {
            pad.jump_requested = false;
        }
    }
}
