use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::GameInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(GameInput),
    /// Ctrl+C, handled by the host without consulting the game
    Interrupt,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Interrupt;
        }

        let input = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => GameInput::Up,
            KeyCode::Down => GameInput::Down,
            KeyCode::Left => GameInput::Left,
            KeyCode::Right => GameInput::Right,

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => GameInput::Up,
            KeyCode::Char('s') | KeyCode::Char('S') => GameInput::Down,
            KeyCode::Char('a') | KeyCode::Char('A') => GameInput::Left,
            KeyCode::Char('d') | KeyCode::Char('D') => GameInput::Right,

            // Controls
            KeyCode::Enter => GameInput::Enter,
            KeyCode::Char(' ') => GameInput::Space,
            KeyCode::Esc => GameInput::Escape,
            KeyCode::Char('p') | KeyCode::Char('P') => GameInput::Pause,
            KeyCode::Char('m') | KeyCode::Char('M') => GameInput::Mute,
            KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,

            _ => return KeyAction::None,
        };

        KeyAction::Game(input)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Game(GameInput::Up));
        assert_eq!(press(KeyCode::Down), KeyAction::Game(GameInput::Down));
        assert_eq!(press(KeyCode::Left), KeyAction::Game(GameInput::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Game(GameInput::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Game(GameInput::Up));
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Game(GameInput::Left));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Game(GameInput::Down));
        assert_eq!(press(KeyCode::Char('d')), KeyAction::Game(GameInput::Right));
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Game(GameInput::Up)
        );
    }

    #[test]
    fn test_menu_and_pause_keys() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Game(GameInput::Enter));
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::Game(GameInput::Space));
        assert_eq!(press(KeyCode::Esc), KeyAction::Game(GameInput::Escape));
        assert_eq!(press(KeyCode::Char('p')), KeyAction::Game(GameInput::Pause));
        assert_eq!(press(KeyCode::Char('m')), KeyAction::Game(GameInput::Mute));
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Game(GameInput::Quit));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Interrupt);
    }
}
