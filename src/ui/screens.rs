use ratatui::prelude::*;
use ratatui::widgets::*;

use super::BG;

const PINK: Color = Color::Rgb(255, 110, 180);
const LILAC: Color = Color::Rgb(190, 150, 210);

pub fn render_start(frame: &mut Frame, area: Rect, frames: u64) {
    frame.render_widget(Block::default().style(Style::default().bg(BG)), area);

    let mut lines = vertical_pad(area, 9);
    lines.push(Line::from(Span::styled(
        "A S T E R O I D S",
        Style::default().fg(PINK).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "hearts edition",
        Style::default().fg(LILAC),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "\u{2190}\u{2192} rotate   \u{2191} thrust   Space shoot",
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(Span::styled(
        "P pause   Ctrl-C quit",
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(""));
    // Slow blink, roughly twice a second.
    if (frames / 30) % 2 == 0 {
        lines.push(Line::from(Span::styled(
            "Press SPACE to start",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(BG));
    frame.render_widget(paragraph, area);
}

pub fn render_pause_overlay(frame: &mut Frame, area: Rect) {
    let overlay_w = 34u16.min(area.width.saturating_sub(4));
    let overlay_h = 5u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" PAUSED ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Press P to resume",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

pub fn render_game_over(
    frame: &mut Frame,
    area: Rect,
    final_score: u32,
    wave: u32,
    high_score: u32,
) {
    frame.render_widget(Block::default().style(Style::default().bg(BG)), area);

    let mut lines = vertical_pad(area, 8);
    lines.push(Line::from(Span::styled(
        "G A M E   O V E R",
        Style::default()
            .fg(Color::Rgb(255, 60, 60))
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Final score: {final_score}"),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("Session best: {high_score}   Wave reached: {wave}"),
        Style::default().fg(LILAC),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "R",
            Style::default()
                .fg(Color::Rgb(100, 255, 100))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" restart   ", Style::default().fg(Color::Gray)),
        Span::styled(
            "Q",
            Style::default()
                .fg(Color::Rgb(255, 100, 100))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" quit", Style::default().fg(Color::Gray)),
    ]));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(BG));
    frame.render_widget(paragraph, area);
}

/// Blank lines that roughly center `content_height` rows vertically.
fn vertical_pad(area: Rect, content_height: u16) -> Vec<Line<'static>> {
    let pad = area.height.saturating_sub(content_height) / 2;
    vec![Line::from(""); pad as usize]
}
