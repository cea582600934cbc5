pub mod field;
pub mod screens;

use ratatui::prelude::*;

use crate::app::App;
use crate::sim::Screen;

/// Night-sky backdrop shared by every screen.
pub(super) const BG: Color = Color::Rgb(10, 10, 30);

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match &app.session.screen {
        Screen::Start => screens::render_start(frame, area, app.frames),
        Screen::Playing(world) => field::render_world(frame, area, world, app, false),
        Screen::Paused(world) => {
            // The frozen field stays visible under the overlay.
            field::render_world(frame, area, world, app, true);
            screens::render_pause_overlay(frame, area);
        }
        Screen::GameOver { final_score, wave } => {
            screens::render_game_over(frame, area, *final_score, *wave, app.session.high_score)
        }
    }
}
