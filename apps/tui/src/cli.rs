use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "radar-layout", version, about = "Tech radar layout engine")]
pub struct CliArgs {
    /// Radar input JSON file (rings, rows or table)
    #[arg(long, value_name = "PATH")]
    pub input: Option<String>,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Print a layout summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the laid-out radar as JSON and exit
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Scale applied to the default blip radius
    #[arg(long = "blip-radius-scale", value_name = "SCALE")]
    pub blip_radius_scale: Option<f64>,

    /// Sector colour override, e.g. tools=#ff8800 (repeatable)
    #[arg(long = "sector-colour", value_name = "SECTOR=COLOUR")]
    pub sector_colours: Vec<String>,

    /// Seed for reproducible placement
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(input) = &self.input {
            std::env::set_var("RADAR_INPUT", input);
        }
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
            std::env::remove_var("RADAR_INPUT");
        }
        if let Some(scale) = self.blip_radius_scale {
            std::env::set_var("RADAR_BLIP_RADIUS_SCALE", scale.to_string());
        }
        if !self.sector_colours.is_empty() {
            std::env::set_var("RADAR_SECTOR_COLOURS", self.sector_colours.join(";"));
        }
        if let Some(seed) = self.seed {
            std::env::set_var("RADAR_SEED", seed.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_sector_colours() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "radar-layout",
            "--input",
            "radar.json",
            "--sector-colour",
            "tools=#ff8800",
            "--sector-colour",
            "languages=teal",
            "--blip-radius-scale",
            "1.5",
            "--json",
        ])?;

        assert_eq!(args.input.as_deref(), Some("radar.json"));
        assert_eq!(args.sector_colours, ["tools=#ff8800", "languages=teal"]);
        assert_eq!(args.blip_radius_scale, Some(1.5));
        assert!(args.json);
        assert!(!args.headless);
        Ok(())
    }
}
