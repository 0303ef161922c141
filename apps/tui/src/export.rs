use serde::Serialize;

use crate::colour::Colour;
use crate::domain::Radar;
use crate::layout::LayoutReport;

/// The laid-out radar as handed to a drawing layer.
#[derive(Debug, Clone, Serialize)]
pub struct RadarExport {
    pub max_radius: f64,
    pub blip_radius: f64,
    pub sectors: Vec<SectorExport>,
    pub rings: Vec<RingExport>,
    pub saturated: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectorExport {
    pub name: String,
    pub id: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub colour: Colour,
    pub blips: Vec<BlipExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlipExport {
    pub id: String,
    pub name: String,
    pub number: Option<u32>,
    pub ring: String,
    pub description: String,
    pub is_new: bool,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RingExport {
    pub name: String,
    pub order: u32,
    pub colour: Colour,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl RadarExport {
    pub fn new(radar: &Radar, report: &LayoutReport, max_radius: f64, blip_radius: f64) -> Self {
        let bands = radar.ring_bands(max_radius);

        let sectors = radar
            .sectors()
            .map(|sector| SectorExport {
                name: sector.name.clone(),
                id: sector.id().to_string(),
                start_angle: sector.start_angle,
                end_angle: sector.end_angle,
                colour: sector.colour,
                blips: sector
                    .blips()
                    .iter()
                    .map(|blip| BlipExport {
                        id: blip.id(),
                        name: blip.name.clone(),
                        number: blip.number,
                        ring: radar
                            .ring(blip.ring)
                            .map(|ring| ring.name.clone())
                            .unwrap_or_default(),
                        description: blip.description.clone(),
                        is_new: blip.is_new,
                        x: blip.coordinates.map(|point| point.x),
                        y: blip.coordinates.map(|point| point.y),
                    })
                    .collect(),
            })
            .collect();

        // Sorted by order here; `Radar::rings` itself keeps first-seen order.
        let mut rings: Vec<RingExport> = radar
            .rings()
            .into_iter()
            .filter_map(|ring| {
                let id = radar.ring_by_name(&ring.name)?;
                let band = bands.get(id)?;
                Some(RingExport {
                    name: ring.name.clone(),
                    order: ring.order,
                    colour: ring.colour,
                    inner_radius: band.inner,
                    outer_radius: band.outer,
                })
            })
            .collect();
        rings.sort_by_key(|ring| ring.order);

        Self {
            max_radius,
            blip_radius,
            sectors,
            rings,
            saturated: report.saturated(),
        }
    }
}
