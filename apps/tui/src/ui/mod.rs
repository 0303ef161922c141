// UI module for radar-layout
// Draws the laid-out radar and its legend

pub mod widgets {
    pub mod radar;
}

use radar_layout::export::RadarExport;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use widgets::radar::{render_radar, to_color};

pub fn ui(export: &RadarExport, f: &mut Frame<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);

    render_radar(export, f, columns[0]);
    render_legend(export, f, columns[1]);

    let footer = Paragraph::new(format!(
        "q/Esc: quit  |  blips: {}  overlaps: {}",
        export.sectors.iter().map(|s| s.blips.len()).sum::<usize>(),
        export.saturated
    ))
    .style(Style::default().fg(Color::Gray));
    f.render_widget(footer, rows[1]);
}

fn render_legend(export: &RadarExport, f: &mut Frame<'_>, area: Rect) {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Rings",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for ring in &export.rings {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(to_color(ring.colour))),
            Span::raw(format!("{} ({})", ring.name, ring.order)),
        ]));
    }

    for sector in &export.sectors {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            sector.name.clone(),
            Style::default()
                .fg(to_color(sector.colour))
                .add_modifier(Modifier::BOLD),
        )));
        for blip in &sector.blips {
            let number = blip.number.map_or_else(String::new, |n| format!("{n:>3} "));
            let marker = if blip.is_new { " *" } else { "" };
            lines.push(Line::from(format!(
                "{number}{} [{}]{marker}",
                blip.name, blip.ring
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Legend").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
