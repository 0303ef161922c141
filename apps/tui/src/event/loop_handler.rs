use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode};
use radar_layout::export::RadarExport;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

use crate::ui;

/// Print the laid-out radar without a UI
pub fn run_headless(export: &RadarExport, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(export)?;
        println!("{json}");
    } else {
        render_headless_summary(export);
    }
    Ok(())
}

fn render_headless_summary(export: &RadarExport) {
    let total_blips: usize = export.sectors.iter().map(|s| s.blips.len()).sum();

    println!("\nTech Radar Layout");
    println!("=================");
    println!("Sectors: {}", export.sectors.len());
    println!("Rings: {}", export.rings.len());
    println!("Blips: {total_blips}");
    println!("Overlapping placements: {}", export.saturated);

    println!("\nSectors:");
    for sector in &export.sectors {
        println!(
            "- {} [{}] {:.3}..{:.3} rad, {} blips, {}",
            sector.name,
            sector.id,
            sector.start_angle,
            sector.end_angle,
            sector.blips.len(),
            sector.colour
        );
    }

    println!("\nRings:");
    for ring in &export.rings {
        println!(
            "- {} (order {}) {:.1}..{:.1}",
            ring.name, ring.order, ring.inner_radius, ring.outer_radius
        );
    }
}

/// Draw the radar until the user quits
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, export: &RadarExport) -> Result<()> {
    const EVENT_POLL_TIMEOUT: u64 = 250;

    loop {
        if let Err(e) = terminal.draw(|f| ui::ui(export, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                }
                // Redrawn on the next pass
                Ok(_) | Err(_) => {}
            }
        }
    }
    Ok(())
}
