mod cli;
mod event;
mod terminal;
mod ui;

use clap::Parser;
use cli::CliArgs;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use radar_layout::colour::ColourGenerator;
use radar_layout::config::{init_app_config, RowSource};
use radar_layout::db::{create_database_pool, fetch_radar_rows};
use radar_layout::export::RadarExport;
use radar_layout::layout::lay_out;
use radar_layout::rows::{RadarBuilder, RadarDocument};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    init_logging(args.debug);

    let config = init_app_config()?;

    let (rings, rows) = match &config.source {
        RowSource::File(path) => RadarDocument::from_path(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?
            .into_rows(),
        RowSource::Database(url) => {
            let pool = create_database_pool(url).await?;
            (Vec::new(), fetch_radar_rows(&pool).await?)
        }
    };
    tracing::debug!(rows = rows.len(), rings = rings.len(), "input loaded");

    // The whole model is rebuilt from scratch on every run
    let mut rng = config
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut radar = RadarBuilder::new(ColourGenerator::new(&mut rng))
        .with_rings(rings)
        .with_sector_colours(config.sector_colours.clone())
        .build(rows);
    let report = lay_out(&mut radar, &config.layout, &mut rng)?;
    let export = RadarExport::new(
        &radar,
        &report,
        config.layout.max_radius,
        config.layout.blip_radius,
    );

    if args.headless || args.json || !is_terminal() {
        return event::run_headless(&export, args.json);
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &export);
    terminal::cleanup(true, true);
    result
}

fn init_logging(debug: bool) {
    let default_level = if debug || std::env::var_os("DEBUG").is_some() {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
