use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec2;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::BG;
use crate::app::App;
use crate::sim::entity::{Asteroid, AsteroidSize, Ship};
use crate::sim::kinematics;
use crate::sim::World;

const HEART: char = '\u{2665}';

pub fn render_world(frame: &mut Frame, area: Rect, world: &World, app: &App, paused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(180, 120, 210)))
        .title(" Asteroids ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 140, 200))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    render_status(frame, chunks[0], world, app.session.high_score);

    let width = chunks[1].width as usize;
    let height = chunks[1].height as usize;
    if width > 0 && height > 0 {
        let bounds = app.session.config().world.bounds();
        let lines = draw_field(world, width, height, bounds, app.last_input.thrust, app.frames);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    render_help(frame, chunks[2], paused);
}

fn render_status(frame: &mut Frame, area: Rect, world: &World, high_score: u32) {
    let sep = Span::styled(" | ", Style::default().fg(Color::DarkGray));
    let status = Line::from(vec![
        Span::styled(
            format!(" {HEART} "),
            Style::default().fg(Color::Rgb(255, 110, 180)),
        ),
        Span::styled(
            format!("Score: {} ", world.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(format!("High: {high_score} "), Style::default().fg(Color::Cyan)),
        sep.clone(),
        Span::styled(
            format!("Wave: {} ", world.wave),
            Style::default().fg(Color::Green),
        ),
        sep,
        Span::styled(
            format!("Rocks: {} ", world.asteroids.len()),
            Style::default().fg(Color::Rgb(180, 150, 200)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

fn render_help(frame: &mut Frame, area: Rect, paused: bool) {
    if paused {
        let msg = Paragraph::new(Line::from(Span::styled(
            " PAUSED - Press P to resume ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(msg, area);
        return;
    }
    let dim = Style::default().fg(Color::DarkGray);
    let bar = Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));
    let help = Paragraph::new(Line::from(vec![
        Span::styled(" \u{2190}\u{2192} Rotate ", dim),
        bar.clone(),
        Span::styled("\u{2191} Thrust ", dim),
        bar.clone(),
        Span::styled(
            "Space Shoot ",
            Style::default()
                .fg(Color::Rgb(255, 110, 180))
                .add_modifier(Modifier::BOLD),
        ),
        bar,
        Span::styled("P Pause", dim),
    ]));
    frame.render_widget(help, area);
}

// ── Braille field rendering ────────────────────────────────────────

/// Dot layer keyed by terminal cell, bits per braille sub-dot.
type DotLayer = HashMap<(usize, usize), u8>;

/// Character canvas over the world. Each cell holds 2x4 braille dots, and
/// world coordinates scale down onto the dot grid.
struct FieldCanvas {
    width: usize,
    height: usize,
    dots_w: i32,
    dots_h: i32,
    scale: Vec2,
    grid: Vec<Vec<(char, Style)>>,
}

impl FieldCanvas {
    fn new(width: usize, height: usize, bounds: Vec2) -> Self {
        let dots_w = (width * 2) as i32;
        let dots_h = (height * 4) as i32;
        Self {
            width,
            height,
            dots_w,
            dots_h,
            scale: Vec2::new(dots_w as f32 / bounds.x, dots_h as f32 / bounds.y),
            grid: vec![vec![(' ', Style::default().bg(BG)); width]; height],
        }
    }

    fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
        match (sub_x, sub_y) {
            (0, 0) => 0x01,
            (0, 1) => 0x02,
            (0, 2) => 0x04,
            (0, 3) => 0x40,
            (1, 0) => 0x08,
            (1, 1) => 0x10,
            (1, 2) => 0x20,
            (1, 3) => 0x80,
            _ => 0,
        }
    }

    fn dot_coords(&self, world_pos: Vec2) -> (i32, i32) {
        (
            (world_pos.x * self.scale.x) as i32,
            (world_pos.y * self.scale.y) as i32,
        )
    }

    /// Set one braille dot in a layer, with bounds checking.
    fn dot_at(&self, layer: &mut DotLayer, dx: i32, dy: i32) {
        if dx < 0 || dy < 0 || dx >= self.dots_w || dy >= self.dots_h {
            return;
        }
        let cell = (dx as usize / 2, dy as usize / 4);
        let bit = Self::braille_bit(dx as usize % 2, dy as usize % 4);
        *layer.entry(cell).or_insert(0) |= bit;
    }

    fn dot(&self, layer: &mut DotLayer, world_pos: Vec2) {
        let (dx, dy) = self.dot_coords(world_pos);
        self.dot_at(layer, dx, dy);
    }

    /// Bresenham line between two world positions.
    fn line(&self, layer: &mut DotLayer, from: Vec2, to: Vec2) {
        let (x0, y0) = self.dot_coords(from);
        let (x1, y1) = self.dot_coords(to);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut cx = x0;
        let mut cy = y0;
        loop {
            self.dot_at(layer, cx, cy);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    /// Write a dot layer onto the grid, merging with braille already there.
    fn blit(&mut self, layer: &DotLayer, color: Color, bold: bool) {
        for (&(cx, cy), &bits) in layer {
            if cx >= self.width || cy >= self.height || bits == 0 {
                continue;
            }
            let mut style = Style::default().fg(color).bg(BG);
            if bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            let existing = self.grid[cy][cx].0 as u32;
            let merged = if (0x2800..0x2900).contains(&existing) {
                (existing - 0x2800) as u8 | bits
            } else {
                bits
            };
            let ch = char::from_u32(0x2800 + merged as u32).unwrap_or(' ');
            self.grid[cy][cx] = (ch, style);
        }
    }

    /// Place a plain character at the cell under a world position.
    fn put_char(&mut self, world_pos: Vec2, ch: char, style: Style) {
        let cx = (world_pos.x * self.scale.x) as i32 / 2;
        let cy = (world_pos.y * self.scale.y) as i32 / 4;
        if cx >= 0 && cy >= 0 && (cx as usize) < self.width && (cy as usize) < self.height {
            self.grid[cy as usize][cx as usize] = (ch, style);
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn draw_field(
    world: &World,
    width: usize,
    height: usize,
    bounds: Vec2,
    thrusting: bool,
    frames: u64,
) -> Vec<Line<'static>> {
    let mut canvas = FieldCanvas::new(width, height, bounds);

    // Sparse background stars.
    for cy in 0..height {
        for cx in 0..width {
            let hash = ((cx * 7 + cy * 13 + 37) * 31) % 250;
            if hash < 2 {
                let b = 35 + (hash as u8) * 15;
                canvas.grid[cy][cx] = ('.', Style::default().fg(Color::Rgb(b, b, b + 8)).bg(BG));
            }
        }
    }

    // Asteroids: spinning irregular polygon outlines.
    for rock in &world.asteroids {
        let verts = asteroid_verts(rock);
        let mut layer = DotLayer::new();
        for i in 0..verts.len() {
            canvas.line(&mut layer, verts[i], verts[(i + 1) % verts.len()]);
        }
        canvas.blit(&layer, rock_color(rock.size, rock.shape_seed), false);
    }

    // Bullets are hearts.
    for bullet in &world.bullets {
        let color = if bullet.life > 30 {
            Color::Rgb(255, 110, 180)
        } else {
            Color::Rgb(190, 80, 140)
        };
        canvas.put_char(
            bullet.pos,
            HEART,
            Style::default().fg(color).bg(BG).add_modifier(Modifier::BOLD),
        );
    }

    draw_ship(&mut canvas, &world.ship, thrusting, frames);

    canvas.into_lines()
}

/// Irregular polygon for an asteroid, spun by its visual angle and shaped
/// by its seed.
fn asteroid_verts(rock: &Asteroid) -> Vec<Vec2> {
    let vert_count = match rock.size {
        AsteroidSize::Large => 11,
        AsteroidSize::Medium => 9,
        AsteroidSize::Small => 7,
    };
    let mut hash = rock.shape_seed as u32;
    (0..vert_count)
        .map(|i| {
            let angle = rock.spin_angle + (i as f32 / vert_count as f32) * std::f32::consts::TAU;
            hash = hash.wrapping_mul(1103515245).wrapping_add(12345);
            let variation = 0.7 + ((hash >> 16) % 300) as f32 / 1000.0;
            rock.pos + kinematics::heading_vector(angle) * (rock.radius * variation)
        })
        .collect()
}

fn rock_color(size: AsteroidSize, seed: u8) -> Color {
    let v = seed % 3;
    match size {
        AsteroidSize::Large => match v {
            0 => Color::Rgb(140, 110, 165),
            1 => Color::Rgb(130, 105, 150),
            _ => Color::Rgb(135, 108, 158),
        },
        AsteroidSize::Medium => match v {
            0 => Color::Rgb(165, 130, 185),
            1 => Color::Rgb(155, 125, 175),
            _ => Color::Rgb(160, 128, 180),
        },
        AsteroidSize::Small => match v {
            0 => Color::Rgb(195, 160, 215),
            1 => Color::Rgb(185, 155, 205),
            _ => Color::Rgb(190, 158, 210),
        },
    }
}

/// Ship triangle: nose, left wing, tail notch, right wing.
fn ship_points(ship: &Ship) -> [Vec2; 4] {
    let a = ship.angle;
    let r = ship.radius;
    let wing_angle = 2.5;
    [
        ship.pos + kinematics::heading_vector(a) * r,
        ship.pos + kinematics::heading_vector(a + PI - wing_angle / 2.0) * (r * 0.75),
        ship.pos + kinematics::heading_vector(a + PI) * (r * 0.4),
        ship.pos + kinematics::heading_vector(a + PI + wing_angle / 2.0) * (r * 0.75),
    ]
}

fn draw_ship(canvas: &mut FieldCanvas, ship: &Ship, thrusting: bool, frames: u64) {
    let points = ship_points(ship);
    let mut ship_layer = DotLayer::new();
    let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
    for &(a, b) in &edges {
        canvas.line(&mut ship_layer, points[a], points[b]);
    }

    let ship_color = if thrusting {
        Color::Rgb(100, 230, 255)
    } else {
        Color::Rgb(80, 255, 140)
    };

    if thrusting {
        let mut flame = DotLayer::new();
        let back = ship.angle + PI;
        for i in 0..10 {
            let dist = ship.radius * (0.6 + i as f32 * 0.15);
            let spread = (i as f32 * 0.18) * if i % 2 == 0 { 1.0 } else { -1.0 };
            canvas.dot(
                &mut flame,
                ship.pos + kinematics::heading_vector(back + spread) * dist,
            );
        }
        // Keep the hull crisp: flame never overwrites ship cells.
        for key in ship_layer.keys() {
            flame.remove(key);
        }
        let flicker = if frames % 3 == 0 {
            Color::Rgb(255, 200, 60)
        } else {
            Color::Rgb(255, 130, 30)
        };
        canvas.blit(&flame, flicker, false);
    }

    canvas.blit(&ship_layer, ship_color, true);
}
