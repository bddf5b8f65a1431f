use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::corpus::TextSource;
use crate::error::Result;
use crate::game::{Game, GameState};

/// Key bindings and the editable input line on top of a [`Game`]
pub struct App<C: Clock = SystemClock> {
    pub game: Game<Box<dyn TextSource>, C>,
    pub input_buffer: String,
    pub should_quit: bool,
}

impl<C: Clock> App<C> {
    pub fn new(corpus: Box<dyn TextSource>, clock: C) -> Self {
        Self {
            game: Game::new(corpus, clock),
            input_buffer: String::new(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    pub fn on_tick(&mut self) -> Result<()> {
        self.game.poll()
    }

    fn play(&mut self) -> Result<()> {
        self.game.start_session()?;
        self.input_buffer.clear();
        Ok(())
    }

    fn menu(&mut self) -> Result<()> {
        self.game.reset_to_menu()?;
        self.input_buffer.clear();
        Ok(())
    }

    /// Sends the whole buffer; a rejected edit snaps the buffer back.
    fn submit(&mut self) -> Result<()> {
        self.game.submit_input(&self.input_buffer)?;
        self.input_buffer = self.game.typed_input();
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            debug!("ctrl+c, quitting");
            self.should_quit = true;
            return Ok(());
        }

        match self.game.state() {
            GameState::Start => match key.code {
                KeyCode::Char('p') | KeyCode::Enter => self.play()?,
                KeyCode::Char('r') => self.game.show_rules()?,
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            GameState::Rules => match key.code {
                KeyCode::Char('p') | KeyCode::Enter => self.play()?,
                KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => self.menu()?,
                _ => {}
            },
            GameState::Playing => match key.code {
                KeyCode::Esc => self.menu()?,
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                    self.submit()?;
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.input_buffer.push(c);
                    self.submit()?;
                }
                _ => {}
            },
            GameState::Won | GameState::Lost => match key.code {
                KeyCode::Char('p') | KeyCode::Enter => self.play()?,
                KeyCode::Char('m') => self.menu()?,
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
        }
        Ok(())
    }
}
