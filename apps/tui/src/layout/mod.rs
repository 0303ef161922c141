// Radar layout: sector angles, ring bands and blip placement.

pub mod geometry;
pub mod placement;

pub use geometry::{Point, RingBand};
pub use placement::{Placement, PlacementEngine, MAX_PLACEMENT_ATTEMPTS};

use rand::Rng;

use crate::domain::Radar;
use crate::error::LayoutError;

pub const DEFAULT_MAX_RADIUS: f64 = 100.0;

/// Blip radius at scale 1.0, in the same units as the maximum radius.
pub const BASE_BLIP_RADIUS: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub max_radius: f64,
    pub blip_radius: f64,
}

impl LayoutSettings {
    pub fn with_blip_scale(scale: f64) -> Self {
        Self {
            blip_radius: BASE_BLIP_RADIUS * scale,
            ..Self::default()
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            max_radius: DEFAULT_MAX_RADIUS,
            blip_radius: BASE_BLIP_RADIUS,
        }
    }
}

/// What one layout pass did, with placements in [`Radar::blips`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    pub placements: Vec<Placement>,
}

impl LayoutReport {
    pub fn placed(&self) -> usize {
        self.placements.len()
    }

    /// Blips that were accepted on top of another after the retry budget ran out.
    pub fn saturated(&self) -> usize {
        self.placements.iter().filter(|p| p.saturated).count()
    }
}

/// Runs a full layout pass over `radar`.
///
/// Sector angles are assigned first, ring bands are fixed for the whole pass,
/// then every blip is placed in sector order and blip order, each one
/// avoiding all blips placed before it anywhere on the radar.
pub fn lay_out<R: Rng>(
    radar: &mut Radar,
    settings: &LayoutSettings,
    rng: R,
) -> Result<LayoutReport, LayoutError> {
    radar.set_sector_angles()?;
    let bands = radar.ring_bands(settings.max_radius);
    let mut engine = PlacementEngine::new(rng, settings.blip_radius);
    let mut report = LayoutReport::default();

    let mut assigned = Vec::with_capacity(radar.sector_count());
    for sector in radar.sectors() {
        let mut points = Vec::with_capacity(sector.blips().len());
        for blip in sector.blips() {
            let band = bands
                .get(blip.ring)
                .ok_or(LayoutError::UnknownRing(blip.ring.index()))?;
            let placement = engine.place(sector, band);
            if placement.saturated {
                tracing::debug!(
                    blip = %blip.name,
                    sector = %sector.name,
                    "no free spot after {MAX_PLACEMENT_ATTEMPTS} attempts, allowing overlap"
                );
            }
            points.push(placement.point);
            report.placements.push(placement);
        }
        assigned.push(points);
    }

    for (sector, points) in radar.sectors_mut().zip(assigned) {
        for (blip, point) in sector.blips_mut().iter_mut().zip(points) {
            blip.coordinates = Some(point);
        }
    }

    tracing::info!(
        sectors = radar.sector_count(),
        rings = bands.ring_count(),
        blips = report.placed(),
        saturated = report.saturated(),
        "radar laid out"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::placement::{distance_bounds, SECTOR_EDGE_MARGIN};
    use super::*;
    use crate::colour::Colour;
    use crate::domain::{Blip, Radar};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::TAU;

    const EPSILON: f64 = 1e-9;

    fn grey() -> Colour {
        Colour::Rgb(128, 128, 128)
    }

    fn build_radar(sectors: usize, rings: u32, blips_per_cell: usize) -> Radar {
        let mut radar = Radar::new();
        let ring_ids: Vec<_> = (1..=rings)
            .map(|order| radar.add_ring(format!("R{order}"), order, grey()))
            .collect();
        for index in 0..sectors {
            let sector = radar.add_sector(format!("Sector {index}"), grey());
            for ring in &ring_ids {
                for n in 0..blips_per_cell {
                    let blip = Blip::new(format!("{index}-{}-{n}", ring.index()), *ring, sector);
                    assert!(radar.add_blip(blip).is_ok());
                }
            }
        }
        radar
    }

    #[test]
    fn empty_radar_is_fatal() {
        let mut radar = Radar::new();
        let result = lay_out(&mut radar, &LayoutSettings::default(), StdRng::seed_from_u64(1));
        assert_eq!(result, Err(LayoutError::EmptyRadar));
    }

    #[test]
    fn every_blip_gets_coordinates() -> Result<(), LayoutError> {
        let mut radar = build_radar(3, 4, 2);
        let report = lay_out(&mut radar, &LayoutSettings::default(), StdRng::seed_from_u64(5))?;

        assert_eq!(report.placed(), 24);
        assert!(radar
            .blips()
            .all(|blip| blip.coordinates.is_some_and(Point::is_finite)));
        Ok(())
    }

    #[test]
    fn crowded_cell_terminates_with_overlaps() -> Result<(), LayoutError> {
        let mut radar = build_radar(1, 1, 200);
        let settings = LayoutSettings {
            max_radius: 10.0,
            blip_radius: 3.0,
        };
        let report = lay_out(&mut radar, &settings, StdRng::seed_from_u64(9))?;

        assert_eq!(report.placed(), 200);
        assert!(report.saturated() > 0);
        let points: Vec<Point> = radar.blips().filter_map(|blip| blip.coordinates).collect();
        assert_eq!(points.len(), 200);
        assert!(points.iter().all(|point| point.is_finite()));

        let min = 2.1 * settings.blip_radius;
        let overlapping = points.iter().enumerate().any(|(i, a)| {
            points[i + 1..].iter().any(|b| a.distance_to(*b) <= min)
        });
        assert!(overlapping);
        Ok(())
    }

    #[test]
    fn later_blips_avoid_earlier_sectors_too() -> Result<(), LayoutError> {
        let mut radar = build_radar(2, 1, 6);
        let settings = LayoutSettings {
            max_radius: 100.0,
            blip_radius: 1.0,
        };
        let report = lay_out(&mut radar, &settings, StdRng::seed_from_u64(21))?;

        let points: Vec<Point> = radar.blips().filter_map(|blip| blip.coordinates).collect();
        for (later, placement) in report.placements.iter().enumerate() {
            if placement.saturated {
                continue;
            }
            for earlier in &points[..later] {
                assert!(earlier.distance_to(points[later]) > 2.1 * settings.blip_radius);
            }
        }
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn sector_angles_partition_the_circle(sectors in 1_usize..40) {
            let mut radar = build_radar(sectors, 1, 0);
            prop_assert!(radar.set_sector_angles().is_ok());
            let all: Vec<_> = radar.sectors().collect();

            prop_assert!(all[0].start_angle.abs() < EPSILON);
            prop_assert!((all[sectors - 1].end_angle - TAU).abs() < EPSILON);
            for pair in all.windows(2) {
                prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() < EPSILON);
                prop_assert!(pair[0].start_angle < pair[0].end_angle);
            }
        }

        #[test]
        fn placements_respect_cells_and_separation(
            sectors in 1_usize..=15,
            rings in 1_u32..=8,
            per_cell in 0_usize..4,
            scale in 0.2_f64..2.0,
            seed in any::<u64>(),
        ) {
            let mut radar = build_radar(sectors, rings, per_cell);
            let settings = LayoutSettings::with_blip_scale(scale);
            let report = lay_out(&mut radar, &settings, StdRng::seed_from_u64(seed))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let bands = radar.ring_bands(settings.max_radius);

            let mut placed: Vec<Point> = Vec::new();
            let mut index = 0;
            for sector in radar.sectors() {
                for blip in sector.blips() {
                    let point = blip.coordinates
                        .ok_or_else(|| TestCaseError::fail("blip left unplaced"))?;
                    let band = bands.get(blip.ring)
                        .ok_or_else(|| TestCaseError::fail("band missing"))?;
                    let (min_distance, max_distance) = distance_bounds(band);

                    let angle = point.angle();
                    prop_assert!(angle >= sector.start_angle + SECTOR_EDGE_MARGIN - EPSILON);
                    prop_assert!(angle <= sector.end_angle - SECTOR_EDGE_MARGIN + EPSILON);
                    prop_assert!(point.magnitude() >= min_distance - EPSILON);
                    prop_assert!(point.magnitude() <= max_distance + EPSILON);

                    if !report.placements[index].saturated {
                        for other in &placed {
                            prop_assert!(other.distance_to(point) > 2.1 * settings.blip_radius);
                        }
                    }
                    placed.push(point);
                    index += 1;
                }
            }
        }
    }
}
