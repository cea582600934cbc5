use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::sim::{self, GameEvent, GameSession, Rotation, TickInput};

pub struct App {
    pub session: GameSession,
    pub should_quit: bool,
    /// Input applied on the most recent tick, kept for rendering the
    /// thrust flame.
    pub last_input: TickInput,
    /// Frames elapsed; drives blink effects on the start screen.
    pub frames: u64,
    /// Input gathered from key events since the last tick.
    pending: TickInput,
    dt: f32,
}

impl App {
    pub fn new(config: Config) -> Self {
        let dt = config.display.tick_ms as f32 / 1000.0;
        Self {
            session: GameSession::new(config),
            should_quit: false,
            last_input: TickInput::default(),
            frames: 0,
            pending: TickInput::default(),
            dt,
        }
    }

    pub fn on_tick(&mut self) {
        self.frames = self.frames.wrapping_add(1);
        let input = std::mem::take(&mut self.pending);
        let events = sim::tick(&mut self.session, &input, self.dt);
        self.last_input = input;

        for event in events {
            match event {
                GameEvent::QuitRequested => self.should_quit = true,
                GameEvent::Started => log::info!("run started"),
                GameEvent::WaveSpawned { wave, count } => {
                    log::debug!("wave {wave}: {count} asteroids");
                }
                GameEvent::AsteroidDestroyed { points, .. } => {
                    log::trace!("asteroid destroyed for {points}");
                }
                GameEvent::GameOver { final_score } => {
                    log::info!("game over, final score {final_score}");
                }
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Keys only mark commands; the state machine drops the ones that
        // have no meaning on the current screen.
        match key.code {
            KeyCode::Up => self.pending.thrust = true,
            KeyCode::Left => self.pending.rotate = Rotation::Left,
            KeyCode::Right => self.pending.rotate = Rotation::Right,
            KeyCode::Char(' ') => {
                self.pending.fire = true;
                self.pending.begin = true;
            }
            KeyCode::Enter => {
                self.pending.begin = true;
                self.pending.restart = true;
            }
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => self.pending.pause = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.pending.restart = true,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.pending.quit = true,
            _ => {}
        }
    }
}
