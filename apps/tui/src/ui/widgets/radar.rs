use radar_layout::colour::Colour;
use radar_layout::export::RadarExport;
use radar_layout::layout::Point;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn to_color(colour: Colour) -> Color {
    let (r, g, b) = colour.to_rgb();
    Color::Rgb(r, g, b)
}

/// Draws a laid-out radar; the canvas uses model coordinates directly.
pub fn render_radar(export: &RadarExport, f: &mut Frame<'_>, area: Rect) {
    if area.width < 8 || area.height < 6 {
        return;
    }

    let block = Block::default()
        .title("Tech Radar")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if export.sectors.iter().all(|sector| sector.blips.is_empty()) {
        let paragraph = Paragraph::new("No blips available")
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    }

    // Terminal cells are roughly twice as tall as wide
    let size = inner.width.min(inner.height.saturating_mul(2));
    let square = Rect {
        x: inner.x + (inner.width - size) / 2,
        y: inner.y,
        width: size,
        height: (size / 2).min(inner.height),
    };

    let max_radius = export.max_radius;
    let bounds = [-max_radius * 1.05, max_radius * 1.05];

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                for ring in &export.rings {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: ring.outer_radius,
                        color: to_color(ring.colour),
                    });
                }

                for sector in &export.sectors {
                    let edge = Point::from_polar(sector.start_angle, max_radius);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: edge.x,
                        y2: edge.y,
                        color: Color::DarkGray,
                    });
                }

                ctx.layer();

                for sector in &export.sectors {
                    let color = to_color(sector.colour);
                    for blip in &sector.blips {
                        let (Some(x), Some(y)) = (blip.x, blip.y) else {
                            continue;
                        };
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: export.blip_radius,
                            color,
                        });
                        if blip.is_new {
                            ctx.draw(&Circle {
                                x,
                                y,
                                radius: export.blip_radius * 1.6,
                                color,
                            });
                        }
                        if let Some(number) = blip.number {
                            ctx.print(
                                x,
                                y,
                                Span::styled(number.to_string(), Style::default().fg(color)),
                            );
                        }
                    }
                }
            })
            .x_bounds(bounds)
            .y_bounds(bounds),
        square,
    );
}
