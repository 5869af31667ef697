//! Menu / Playing / Paused / GameOver state machine
//!
//! The machine only tracks where the player is and what the input means there.
//! It hands the consequences back as a [`Command`] for the controller to carry
//! out, so it never touches session or score state itself.

use super::action::{Direction, GameInput};
use super::difficulty::Difficulty;

/// Entries of the top menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    NewGame,
    Difficulty,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::NewGame, MenuItem::Difficulty, MenuItem::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewGame => "New Game",
            MenuItem::Difficulty => "Difficulty",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Which list the menu is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuScreen {
    TopMenu,
    DifficultySelect,
}

impl MenuScreen {
    /// Number of selectable rows
    pub fn len(&self) -> usize {
        match self {
            MenuScreen::TopMenu => MenuItem::ALL.len(),
            MenuScreen::DifficultySelect => Difficulty::ALL.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Menu(MenuScreen),
    Playing,
    Paused,
    GameOver,
}

/// What the controller has to do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    /// Build a new session at this difficulty
    StartSession(Difficulty),
    /// Queue a turn on the running session
    Steer(Direction),
    Pause,
    Resume,
    /// Drop the finished session and go back to the top menu
    ReturnToMenu,
    DifficultyChanged(Difficulty),
    ToggleMute,
    /// Terminate the process
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateMachine {
    state: GameState,
    selected_index: usize,
    difficulty: Difficulty,
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl GameStateMachine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            state: GameState::Menu(MenuScreen::TopMenu),
            selected_index: 0,
            difficulty,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Ticks only run while playing
    pub fn is_ticking(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn handle_input(&mut self, input: GameInput) -> Command {
        if input == GameInput::Mute {
            return Command::ToggleMute;
        }

        match self.state {
            GameState::Menu(MenuScreen::TopMenu) => self.handle_top_menu(input),
            GameState::Menu(MenuScreen::DifficultySelect) => self.handle_difficulty_select(input),
            GameState::Playing => match input {
                GameInput::Pause | GameInput::Escape => {
                    self.state = GameState::Paused;
                    Command::Pause
                }
                _ => input.direction().map_or(Command::None, Command::Steer),
            },
            GameState::Paused => match input {
                GameInput::Space | GameInput::Escape => {
                    self.state = GameState::Playing;
                    Command::Resume
                }
                _ => Command::None,
            },
            GameState::GameOver => match input {
                GameInput::Space => {
                    self.state = GameState::Menu(MenuScreen::TopMenu);
                    self.selected_index = 0;
                    Command::ReturnToMenu
                }
                _ => Command::None,
            },
        }
    }

    /// The running session has ended
    pub fn end_session(&mut self) {
        if matches!(self.state, GameState::Playing | GameState::Paused) {
            self.state = GameState::GameOver;
        }
    }

    /// Back out of a session that could not be started
    pub fn abort_session(&mut self) {
        self.state = GameState::Menu(MenuScreen::TopMenu);
        self.selected_index = 0;
    }

    fn handle_top_menu(&mut self, input: GameInput) -> Command {
        match input {
            GameInput::Up => self.move_selection(-1, MenuScreen::TopMenu),
            GameInput::Down => self.move_selection(1, MenuScreen::TopMenu),
            GameInput::Enter => match MenuItem::ALL.get(self.selected_index) {
                Some(MenuItem::NewGame) => {
                    self.state = GameState::Playing;
                    Command::StartSession(self.difficulty)
                }
                Some(MenuItem::Difficulty) => {
                    self.state = GameState::Menu(MenuScreen::DifficultySelect);
                    self.selected_index = 0;
                    Command::None
                }
                Some(MenuItem::Quit) => Command::Exit,
                None => Command::None,
            },
            GameInput::Quit => Command::Exit,
            _ => Command::None,
        }
    }

    fn handle_difficulty_select(&mut self, input: GameInput) -> Command {
        match input {
            GameInput::Up => self.move_selection(-1, MenuScreen::DifficultySelect),
            GameInput::Down => self.move_selection(1, MenuScreen::DifficultySelect),
            GameInput::Enter => {
                let chosen = Difficulty::from_index(self.selected_index).unwrap_or(self.difficulty);
                self.difficulty = chosen;
                self.state = GameState::Menu(MenuScreen::TopMenu);
                self.selected_index = 0;
                Command::DifficultyChanged(chosen)
            }
            GameInput::Escape => {
                self.state = GameState::Menu(MenuScreen::TopMenu);
                self.selected_index = 0;
                Command::None
            }
            _ => Command::None,
        }
    }

    fn move_selection(&mut self, step: isize, screen: MenuScreen) -> Command {
        let len = screen.len() as isize;
        self.selected_index = (self.selected_index as isize + step).rem_euclid(len) as usize;
        Command::None
    }
}
