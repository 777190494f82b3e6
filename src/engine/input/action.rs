// Player actions and the fixed two-player key layout

use winit::keyboard::KeyCode;

pub const PLAYER_COUNT: usize = 2;

/// Abstract action a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
}

/// Resolve a physical key to (player index, action). Layout is fixed:
/// player 0 on WASD+F, player 1 on arrows+Enter.
pub fn action_for_key(key: KeyCode) -> Option<(usize, Action)> {
    match key {
        KeyCode::KeyA => Some((0, Action::MoveLeft)),
        KeyCode::KeyD => Some((0, Action::MoveRight)),
        KeyCode::KeyW => Some((0, Action::Jump)),
        KeyCode::KeyF => Some((0, Action::Attack)),

        KeyCode::ArrowLeft => Some((1, Action::MoveLeft)),
        KeyCode::ArrowRight => Some((1, Action::MoveRight)),
        KeyCode::ArrowUp => Some((1, Action::Jump)),
        KeyCode::Enter | KeyCode::NumpadEnter => Some((1, Action::Attack)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_one_bindings() {
        assert_eq!(action_for_key(KeyCode::KeyA), Some((0, Action::MoveLeft)));
        assert_eq!(action_for_key(KeyCode::KeyD), Some((0, Action::MoveRight)));
        assert_eq!(action_for_key(KeyCode::KeyW), Some((0, Action::Jump)));
        assert_eq!(action_for_key(KeyCode::KeyF), Some((0, Action::Attack)));
    }

    #[test]
    fn test_player_two_bindings() {
        assert_eq!(
            action_for_key(KeyCode::ArrowLeft),
            Some((1, Action::MoveLeft))
        );
        assert_eq!(
            action_for_key(KeyCode::ArrowRight),
            Some((1, Action::MoveRight))
        );
        assert_eq!(action_for_key(KeyCode::ArrowUp), Some((1, Action::Jump)));
        assert_eq!(action_for_key(KeyCode::Enter), Some((1, Action::Attack)));
        assert_eq!(
            action_for_key(KeyCode::NumpadEnter),
            Some((1, Action::Attack))
        );
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(action_for_key(KeyCode::KeyQ), None);
        assert_eq!(action_for_key(KeyCode::Space), None);
    }
}
