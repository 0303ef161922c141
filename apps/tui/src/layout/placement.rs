use std::f64::consts::PI;

use rand::Rng;

use crate::domain::Sector;
use crate::layout::geometry::{Point, RingBand};

/// Candidates drawn per blip before an overlapping spot is accepted.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10;

/// Angular inset from both sector edges.
pub const SECTOR_EDGE_MARGIN: f64 = PI / 16.0;

/// Minimum centre distance between blips, in blip radii.
pub const SEPARATION_FACTOR: f64 = 2.1;

pub const INNER_RING_INSET: f64 = 1.1;
pub const OUTER_RING_INSET: f64 = 0.9;

/// Outcome of placing one blip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub point: Point,
    /// Candidates drawn, including the accepted one.
    pub attempts: usize,
    /// No candidate cleared every placed blip; `point` may overlap.
    pub saturated: bool,
}

/// Angle bounds for sampling inside a sector.
///
/// The inset is [`SECTOR_EDGE_MARGIN`] whenever the span is wider than both
/// margins together; narrower sectors are inset by a quarter of their span.
pub fn angle_bounds(sector: &Sector) -> (f64, f64) {
    let span = sector.span();
    let margin = if span > 2.0 * SECTOR_EDGE_MARGIN {
        SECTOR_EDGE_MARGIN
    } else {
        span / 4.0
    };
    (sector.start_angle + margin, sector.end_angle - margin)
}

/// Distance bounds for sampling inside a ring band.
///
/// From the sixth ring outwards the multiplicative insets cross over; those
/// bands are inset by a tenth of their width on each side instead.
pub fn distance_bounds(band: RingBand) -> (f64, f64) {
    let max = band.outer * OUTER_RING_INSET;
    let min = band.inner * INNER_RING_INSET;
    if min <= 0.0 {
        // Innermost ring: keep clear of the centre point.
        return (max / 2.0, max);
    }
    if min >= max {
        let inset = band.width() * (1.0 - OUTER_RING_INSET);
        return (band.inner + inset, band.outer - inset);
    }
    (min, max)
}

fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

/// Rejection sampler that keeps blips apart across a whole radar.
///
/// Every accepted point is remembered, so later blips treat earlier ones
/// from any sector as obstacles. One engine serves exactly one layout pass.
#[derive(Debug)]
pub struct PlacementEngine<R> {
    rng: R,
    blip_radius: f64,
    placed: Vec<Point>,
}

impl<R: Rng> PlacementEngine<R> {
    pub const fn new(rng: R, blip_radius: f64) -> Self {
        Self {
            rng,
            blip_radius,
            placed: Vec::new(),
        }
    }

    pub fn min_separation(&self) -> f64 {
        SEPARATION_FACTOR * self.blip_radius
    }

    pub fn placed(&self) -> &[Point] {
        &self.placed
    }

    fn is_clear(&self, candidate: Point) -> bool {
        let min = self.min_separation();
        self.placed
            .iter()
            .all(|existing| existing.distance_to(candidate) > min)
    }

    /// Draws candidates in the sector/band cell until one clears every
    /// previously placed blip, giving up after [`MAX_PLACEMENT_ATTEMPTS`]
    /// and keeping the last candidate.
    pub fn place(&mut self, sector: &Sector, band: RingBand) -> Placement {
        let (min_angle, max_angle) = angle_bounds(sector);
        let (min_distance, max_distance) = distance_bounds(band);

        let mut point = Point::new(0.0, 0.0);
        let mut attempts = 0;
        let mut saturated = true;

        while attempts < MAX_PLACEMENT_ATTEMPTS {
            attempts += 1;
            let angle = sample(&mut self.rng, min_angle, max_angle);
            let distance = sample(&mut self.rng, min_distance, max_distance);
            point = Point::from_polar(angle, distance);
            if self.is_clear(point) {
                saturated = false;
                break;
            }
        }

        self.placed.push(point);
        Placement {
            point,
            attempts,
            saturated,
        }
    }
}
