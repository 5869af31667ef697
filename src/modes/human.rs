use std::io::{self, Stderr};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::audio::AudioSink;
use crate::game::{BestScoreStore, Flow, GameConfig, GameController, GameInput};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Redraw at roughly 30 frames per second
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Keyboard play in the terminal.
///
/// Input events and simulation ticks are multiplexed on one task, so a tick
/// never runs while an input is being applied.
pub struct HumanMode {
    controller: GameController,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        config: GameConfig,
        store: Box<dyn BestScoreStore>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let tick_interval = Duration::from_millis(config.tick_interval_ms);

        Self {
            controller: GameController::new(config, store, audio),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            should_quit: false,
        }
    }

    /// Take over the terminal, play until quit, then hand the terminal back
    /// even if the loop failed.
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = open_terminal()?;
        let outcome = self.event_loop(&mut terminal).await;
        close_terminal(&mut terminal)?;
        outcome
    }

    async fn event_loop(&mut self, terminal: &mut Term) -> Result<()> {
        let mut keys = EventStream::new();

        let mut ticks = interval(self.tick_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames = interval(FRAME_INTERVAL);

        while !self.should_quit {
            tokio::select! {
                next = keys.next() => match next {
                    Some(Ok(event)) => self.on_terminal_event(event),
                    Some(Err(e)) => return Err(e).context("Terminal input stream failed"),
                    None => self.should_quit = true,
                },

                // No-op outside of Playing
                _ = ticks.tick() => {
                    self.controller.update(Instant::now());
                }

                _ = frames.tick() => {
                    let snapshot = self.controller.snapshot();
                    terminal
                        .draw(|frame| self.renderer.render(frame, &snapshot))
                        .context("Could not draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("received SIGINT");
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    fn on_terminal_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Repeats and releases are ignored
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Game(input) => self.dispatch(input),
            KeyAction::Interrupt => {
                info!("interrupted");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn dispatch(&mut self, input: GameInput) {
        if self.controller.handle_input(input, Instant::now()) == Flow::Exit {
            self.should_quit = true;
        }
    }
}

type Term = Terminal<CrosstermBackend<Stderr>>;

fn open_terminal() -> Result<Term> {
    terminal::enable_raw_mode().context("Could not switch terminal to raw mode")?;
    let mut out = io::stderr();
    execute!(out, EnterAlternateScreen).context("Could not open alternate screen")?;

    let mut term = Terminal::new(CrosstermBackend::new(out)).context("Could not create terminal")?;
    term.hide_cursor()?;
    term.clear()?;
    Ok(term)
}

fn close_terminal(term: &mut Term) -> Result<()> {
    terminal::disable_raw_mode().context("Could not restore terminal mode")?;
    execute!(term.backend_mut(), LeaveAlternateScreen)
        .context("Could not leave alternate screen")?;
    term.show_cursor()?;
    Ok(())
}
