use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InputError;

pub const GOLDEN_RATIO: f64 = 1.618_033_99;

/// Hue step (degrees) between consecutive generated colours: 360 * phi^-2.
pub const GOLDEN_ANGLE: f64 = 360.0 / (GOLDEN_RATIO * GOLDEN_RATIO);

pub const GENERATED_SATURATION: f64 = 45.0;
pub const GENERATED_LIGHTNESS: f64 = 50.0;

const RING_BASE_LIGHTNESS: f64 = 92.0;
const RING_MAX_DARKEN: f64 = 0.5;

/// A display colour, either as HSL (degrees, percent, percent) or 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Colour {
    Hsl {
        hue: f64,
        saturation: f64,
        lightness: f64,
    },
    Rgb(u8, u8, u8),
}

impl Colour {
    pub const fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self::Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    /// Converts to 8-bit RGB for backends that cannot take HSL.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Rgb(r, g, b) => (r, g, b),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0),
        }
    }

    /// Returns a darker copy; `amount` is the fraction of lightness removed.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        let keep = (1.0 - amount).clamp(0.0, 1.0);
        match self {
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => Self::hsl(hue, saturation, lightness * keep),
            Self::Rgb(r, g, b) => Self::Rgb(scale(r, keep), scale(g, keep), scale(b, keep)),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(channel: u8, factor: f64) -> u8 {
    (f64::from(channel) * factor).round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - 2.0_f64.mul_add(lightness, -1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let second = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector {
        s if s < 1.0 => (chroma, second, 0.0),
        s if s < 2.0 => (second, chroma, 0.0),
        s if s < 3.0 => (0.0, chroma, second),
        s if s < 4.0 => (0.0, second, chroma),
        s if s < 5.0 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };
    let offset = lightness - chroma / 2.0;
    let channel = |value: f64| ((value + offset) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue},{saturation}%,{lightness}%)"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Colour {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        let invalid = || InputError::InvalidColour(value.to_string());

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }
        if let Some(args) = lower
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts = parse_components(args).ok_or_else(invalid)?;
            return Ok(Self::hsl(parts[0], parts[1], parts[2]));
        }
        if let Some(args) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts = parse_components(args).ok_or_else(invalid)?;
            return Ok(Self::Rgb(
                to_channel(parts[0]),
                to_channel(parts[1]),
                to_channel(parts[2]),
            ));
        }

        named_colour(&lower).ok_or_else(invalid)
    }
}

fn parse_hex(hex: &str) -> Option<Colour> {
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |index: usize| u8::from_str_radix(expanded.get(index..index + 2)?, 16).ok();
    Some(Colour::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_components(args: &str) -> Option<[f64; 3]> {
    let values = args
        .split(',')
        .map(|part| part.trim().trim_end_matches('%').parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    <[f64; 3]>::try_from(values).ok()
}

fn named_colour(name: &str) -> Option<Colour> {
    let rgb = match name {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "purple" => (128, 0, 128),
        "gray" | "grey" => (128, 128, 128),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        _ => return None,
    };
    Some(Colour::Rgb(rgb.0, rgb.1, rgb.2))
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Hands out well-spread colours for sectors that have no explicit override.
///
/// Each generator starts from its own hue offset so two radars built in
/// succession do not share a palette, then walks the hue circle by the
/// golden angle.
#[derive(Debug, Clone)]
pub struct ColourGenerator {
    last_hue: f64,
}

impl ColourGenerator {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_offset(rng.random_range(0.0..360.0))
    }

    pub fn with_offset(offset: f64) -> Self {
        Self {
            last_hue: offset.rem_euclid(360.0),
        }
    }

    pub fn next_colour(&mut self) -> Colour {
        let hue = (self.last_hue + GOLDEN_ANGLE) % 360.0;
        self.last_hue = hue;
        Colour::hsl(hue, GENERATED_SATURATION, GENERATED_LIGHTNESS)
    }
}

/// Default ring shade: a light grey that darkens towards the outside.
pub fn ring_colour(order: u32, ring_count: usize) -> Colour {
    #[allow(clippy::cast_precision_loss)]
    let count = ring_count.max(1) as f64;
    let step = f64::from(order.saturating_sub(1)) / count;
    Colour::hsl(0.0, 0.0, RING_BASE_LIGHTNESS).darken(step * RING_MAX_DARKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_of(colour: Colour) -> f64 {
        match colour {
            Colour::Hsl { hue, .. } => hue,
            Colour::Rgb(..) => panic!("generator should produce HSL"),
        }
    }

    #[test]
    fn golden_angle_is_about_137_5_degrees() {
        assert!((GOLDEN_ANGLE - 137.507_764).abs() < 1e-5);
    }

    #[test]
    fn generator_steps_by_golden_angle_and_wraps() {
        let mut generator = ColourGenerator::with_offset(300.0);
        let first = hue_of(generator.next_colour());
        let second = hue_of(generator.next_colour());

        assert!((first - (300.0 + GOLDEN_ANGLE - 360.0)).abs() < 1e-9);
        assert!((second - (first + GOLDEN_ANGLE)).abs() < 1e-9);
    }

    #[test]
    fn generator_uses_fixed_saturation_and_lightness() {
        let mut generator = ColourGenerator::with_offset(0.0);
        let colour = generator.next_colour();

        assert_eq!(
            colour,
            Colour::hsl(GOLDEN_ANGLE, GENERATED_SATURATION, GENERATED_LIGHTNESS)
        );
        assert!(colour.to_string().ends_with(",45%,50%)"));
    }

    #[test]
    fn generator_does_not_repeat_hues_within_a_session() {
        let mut generator = ColourGenerator::with_offset(12.5);
        let hues: Vec<f64> = (0..200).map(|_| hue_of(generator.next_colour())).collect();

        for (i, a) in hues.iter().enumerate() {
            for b in &hues[i + 1..] {
                assert!((a - b).abs() > 1e-6, "hue {a} repeated");
            }
        }
    }

    #[test]
    fn parses_hex_hsl_rgb_and_named_colours() -> Result<(), InputError> {
        assert_eq!("#ff8800".parse::<Colour>()?, Colour::Rgb(255, 136, 0));
        assert_eq!("#f80".parse::<Colour>()?, Colour::Rgb(255, 136, 0));
        assert_eq!(
            "hsl(120, 45%, 50%)".parse::<Colour>()?,
            Colour::hsl(120.0, 45.0, 50.0)
        );
        assert_eq!("rgb(1, 2, 3)".parse::<Colour>()?, Colour::Rgb(1, 2, 3));
        assert_eq!("Teal".parse::<Colour>()?, Colour::Rgb(0, 128, 128));
        assert!("not-a-colour".parse::<Colour>().is_err());
        assert!("#12345".parse::<Colour>().is_err());
        Ok(())
    }

    #[test]
    fn hsl_converts_to_rgb() {
        assert_eq!(Colour::hsl(0.0, 100.0, 50.0).to_rgb(), (255, 0, 0));
        assert_eq!(Colour::hsl(120.0, 100.0, 50.0).to_rgb(), (0, 255, 0));
        assert_eq!(Colour::hsl(240.0, 100.0, 50.0).to_rgb(), (0, 0, 255));
        assert_eq!(Colour::hsl(0.0, 0.0, 100.0).to_rgb(), (255, 255, 255));
    }

    #[test]
    fn darken_returns_a_new_value() {
        let base = Colour::Rgb(200, 100, 50);
        let darker = base.darken(0.5);

        assert_eq!(base, Colour::Rgb(200, 100, 50));
        assert_eq!(darker, Colour::Rgb(100, 50, 25));
    }

    #[test]
    fn ring_colours_darken_outwards() {
        let lightness = |colour: Colour| match colour {
            Colour::Hsl { lightness, .. } => lightness,
            Colour::Rgb(..) => f64::NAN,
        };
        let inner = lightness(ring_colour(1, 4));
        let outer = lightness(ring_colour(4, 4));

        assert!((inner - RING_BASE_LIGHTNESS).abs() < 1e-9);
        assert!(outer < inner);
    }
}
