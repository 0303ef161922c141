use color_eyre::eyre::{eyre, WrapErr};
use dotenv::dotenv;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::colour::Colour;
use crate::domain::derive_id;
use crate::error::InputError;
use crate::layout::LayoutSettings;

pub const DEFAULT_DATABASE_NAME: &str = "radar.db";

/// Where radar rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSource {
    File(PathBuf),
    Database(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source: RowSource,
    pub layout: LayoutSettings,
    /// Keyed by sector id.
    pub sector_colours: HashMap<String, Colour>,
    /// Fixes every random draw when set; unseeded runs differ each time.
    pub seed: Option<u64>,
}

/// Loads `.env`, then reads configuration from the process environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    dotenv().ok();
    let base_dir: PathBuf = env::current_dir()?;
    AppConfig::from_vars(|key| env::var(key).ok(), &base_dir)
}

impl AppConfig {
    /// Builds the configuration from a variable lookup.
    ///
    /// `RADAR_INPUT` selects a JSON file; otherwise rows come from the SQLite
    /// database named by `DATABASE_NAME`, relative to `base_dir`.
    pub fn from_vars<F>(lookup: F, base_dir: &Path) -> color_eyre::eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = match lookup("RADAR_INPUT").filter(|value| !value.trim().is_empty()) {
            Some(path) => RowSource::File(base_dir.join(path)),
            None => {
                let db_name =
                    lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
                RowSource::Database(database_url(&base_dir.join(db_name))?)
            }
        };

        let scale = match lookup("RADAR_BLIP_RADIUS_SCALE") {
            Some(raw) => parse_scale(&raw)?,
            None => 1.0,
        };

        let sector_colours = match lookup("RADAR_SECTOR_COLOURS") {
            Some(raw) => parse_sector_colours(&raw)?,
            None => HashMap::new(),
        };

        let seed = lookup("RADAR_SEED")
            .map(|raw| raw.trim().parse::<u64>())
            .transpose()
            .wrap_err("RADAR_SEED must be an unsigned integer")?;

        Ok(Self {
            source,
            layout: LayoutSettings::with_blip_scale(scale),
            sector_colours,
            seed,
        })
    }
}

fn parse_scale(raw: &str) -> color_eyre::eyre::Result<f64> {
    let scale: f64 = raw
        .trim()
        .parse()
        .wrap_err_with(|| format!("invalid blip radius scale '{raw}'"))?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(eyre!("blip radius scale must be a positive number, got {scale}"));
    }
    Ok(scale)
}

/// Formats a database path as a SQLx SQLite URL.
fn database_url(database_path: &Path) -> color_eyre::eyre::Result<String> {
    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    // Absolute paths need three slashes in total, relative paths two
    let clean_path = path_str.trim_start_matches('/');
    let url = if database_path.is_absolute() {
        format!("sqlite:///{clean_path}")
    } else {
        format!("sqlite://{clean_path}")
    };
    Ok(url)
}

/// Parses one `<sector>=<colour>` override; the sector part is normalised to an id.
pub fn parse_colour_override(raw: &str) -> Result<(String, Colour), InputError> {
    let (sector, colour) = raw
        .split_once('=')
        .ok_or_else(|| InputError::InvalidColourOverride(raw.to_string()))?;
    let id = derive_id(sector);
    if id.is_empty() {
        return Err(InputError::InvalidColourOverride(raw.to_string()));
    }
    Ok((id, colour.parse()?))
}

/// Parses `;`-separated overrides, e.g. `tools=#ff8800;languages=hsl(200,45%,50%)`.
pub fn parse_sector_colours(raw: &str) -> Result<HashMap<String, Colour>, InputError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_colour_override)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BASE_BLIP_RADIUS, DEFAULT_MAX_RADIUS};

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn defaults_to_database_source_and_unit_scale() -> color_eyre::eyre::Result<()> {
        let config = AppConfig::from_vars(lookup(&[]), Path::new("/srv/radar"))?;

        assert_eq!(
            config.source,
            RowSource::Database("sqlite:///srv/radar/radar.db".to_string())
        );
        assert!((config.layout.blip_radius - BASE_BLIP_RADIUS).abs() < 1e-12);
        assert!((config.layout.max_radius - DEFAULT_MAX_RADIUS).abs() < 1e-12);
        assert!(config.sector_colours.is_empty());
        assert_eq!(config.seed, None);
        Ok(())
    }

    #[test]
    fn input_file_and_overrides_are_read() -> color_eyre::eyre::Result<()> {
        let vars = [
            ("RADAR_INPUT", "radar.json"),
            ("RADAR_BLIP_RADIUS_SCALE", "2"),
            ("RADAR_SECTOR_COLOURS", "Dev Tools=#ff0000; languages=hsl(200,45%,50%)"),
            ("RADAR_SEED", "42"),
        ];
        let config = AppConfig::from_vars(lookup(&vars), Path::new("data"))?;

        assert_eq!(config.source, RowSource::File(PathBuf::from("data/radar.json")));
        assert!((config.layout.blip_radius - 2.0 * BASE_BLIP_RADIUS).abs() < 1e-12);
        assert_eq!(config.sector_colours.get("devtools"), Some(&Colour::Rgb(255, 0, 0)));
        assert_eq!(
            config.sector_colours.get("languages"),
            Some(&Colour::hsl(200.0, 45.0, 50.0))
        );
        assert_eq!(config.seed, Some(42));
        Ok(())
    }

    #[test]
    fn rejects_bad_scale_and_colours() {
        let negative = [("RADAR_BLIP_RADIUS_SCALE", "-1")];
        let garbage = [("RADAR_BLIP_RADIUS_SCALE", "big")];
        assert!(AppConfig::from_vars(lookup(&negative), Path::new(".")).is_err());
        assert!(AppConfig::from_vars(lookup(&garbage), Path::new(".")).is_err());
        assert!(parse_colour_override("tools").is_err());
        assert!(parse_colour_override("=#fff").is_err());
        assert!(parse_colour_override("tools=nope").is_err());
    }
}
