use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::colour::{ring_colour, Colour, ColourGenerator};
use crate::domain::{derive_id, Blip, Radar, RingId};
use crate::error::InputError;

/// One input row, looked up by role name rather than column position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarRow {
    pub name: Option<String>,
    #[serde(alias = "quadrant")]
    pub sector: Option<String>,
    pub ring: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "isNew", alias = "new")]
    pub is_new: Option<bool>,
}

impl RadarRow {
    pub fn new(name: &str, sector: &str, ring: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            sector: Some(sector.to_string()),
            ring: Some(ring.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Name,
    Sector,
    Ring,
    Description,
    IsNew,
}

impl Role {
    fn from_column(column: &str) -> Option<Self> {
        match derive_id(column).as_str() {
            "name" | "title" => Some(Self::Name),
            "sector" | "quadrant" | "category" => Some(Self::Sector),
            "ring" => Some(Self::Ring),
            "description" => Some(Self::Description),
            "isnew" | "is_new" | "new" => Some(Self::IsNew),
            _ => None,
        }
    }
}

/// Positional rows plus a header; columns may come in any order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowTable {
    pub fn into_rows(self) -> Vec<RadarRow> {
        let roles: Vec<Option<Role>> = self
            .columns
            .iter()
            .map(|column| Role::from_column(column))
            .collect();

        self.rows
            .into_iter()
            .map(|cells| {
                let mut row = RadarRow::default();
                for (role, cell) in roles.iter().zip(cells) {
                    match role {
                        Some(Role::Name) => row.name = text(cell),
                        Some(Role::Sector) => row.sector = text(cell),
                        Some(Role::Ring) => row.ring = text(cell),
                        Some(Role::Description) => row.description = text(cell),
                        Some(Role::IsNew) => row.is_new = flag(&cell),
                        None => {}
                    }
                }
                row
            })
            .collect()
    }
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// An externally supplied ring definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub name: String,
    pub order: Option<u32>,
    pub colour: Option<Colour>,
}

/// A radar input file: optional ring catalog plus rows, as objects or a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarDocument {
    #[serde(default)]
    pub rings: Vec<RingSpec>,
    #[serde(default)]
    pub rows: Vec<RadarRow>,
    #[serde(default)]
    pub table: Option<RowTable>,
}

impl RadarDocument {
    pub fn from_json_str(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Object rows first, then table rows.
    pub fn into_rows(self) -> (Vec<RingSpec>, Vec<RadarRow>) {
        let mut rows = self.rows;
        if let Some(table) = self.table {
            rows.extend(table.into_rows());
        }
        (self.rings, rows)
    }
}

fn required(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Groups rows into a [`Radar`].
///
/// Rows missing a name, sector or ring are skipped. A ring that is not in
/// the catalog is appended outside the known rings. Sector colours come from
/// the overrides, keyed by sector id, or from the colour generator.
#[derive(Debug, Clone)]
pub struct RadarBuilder {
    ring_catalog: Vec<RingSpec>,
    sector_colours: HashMap<String, Colour>,
    colours: ColourGenerator,
    sort_by_ring: bool,
}

impl RadarBuilder {
    pub fn new(colours: ColourGenerator) -> Self {
        Self {
            ring_catalog: Vec::new(),
            sector_colours: HashMap::new(),
            colours,
            sort_by_ring: true,
        }
    }

    #[must_use]
    pub fn with_rings(mut self, rings: Vec<RingSpec>) -> Self {
        self.ring_catalog = rings;
        self
    }

    #[must_use]
    pub fn with_sector_colours(mut self, colours: HashMap<String, Colour>) -> Self {
        self.sector_colours = colours;
        self
    }

    #[must_use]
    pub const fn sort_by_ring(mut self, sort: bool) -> Self {
        self.sort_by_ring = sort;
        self
    }

    pub fn build<I>(mut self, rows: I) -> Radar
    where
        I: IntoIterator<Item = RadarRow>,
    {
        let mut radar = Radar::new();
        let mut explicit_ring_colours = Vec::new();
        let has_catalog = !self.ring_catalog.is_empty();

        for (position, spec) in self.ring_catalog.iter().enumerate() {
            let order = spec
                .order
                .unwrap_or_else(|| u32::try_from(position + 1).unwrap_or(u32::MAX));
            let colour = spec.colour.unwrap_or_else(|| ring_colour(order, 1));
            let id = radar.add_ring(spec.name.clone(), order, colour);
            if spec.colour.is_some() {
                explicit_ring_colours.push(id);
            }
        }

        let mut accepted: u32 = 0;
        for (line, row) in rows.into_iter().enumerate() {
            let (Some(name), Some(sector_name), Some(ring_name)) = (
                required(row.name.as_ref()),
                required(row.sector.as_ref()),
                required(row.ring.as_ref()),
            ) else {
                tracing::warn!(row = line + 1, "skipping row without name, sector or ring");
                continue;
            };

            let ring = radar.ring_by_name(ring_name).unwrap_or_else(|| {
                let order = radar.max_ring_order() + 1;
                if has_catalog {
                    tracing::warn!(ring = %ring_name, order, "unknown ring, adding it outermost");
                }
                radar.add_ring(ring_name, order, ring_colour(order, 1))
            });

            let sector = radar.sector_by_name(sector_name).unwrap_or_else(|| {
                let colour = self
                    .sector_colours
                    .get(&derive_id(sector_name))
                    .copied()
                    .unwrap_or_else(|| self.colours.next_colour());
                radar.add_sector(sector_name, colour)
            });

            accepted += 1;
            let blip = Blip::new(name.to_string(), ring, sector)
                .with_number(accepted)
                .with_description(row.description.as_deref().unwrap_or_default().trim())
                .with_new_flag(row.is_new.unwrap_or(false));
            if let Err(e) = radar.add_blip(blip) {
                tracing::warn!(row = line + 1, "skipping row: {e}");
            }
        }

        let ring_count = radar
            .ring_registry()
            .len()
            .max(radar.max_ring_order() as usize);
        let generated: Vec<RingId> = radar
            .ring_ids()
            .filter(|id| !explicit_ring_colours.contains(id))
            .collect();
        for id in generated {
            if let Some(ring) = radar.ring_mut(id) {
                ring.colour = ring_colour(ring.order, ring_count);
            }
        }

        if self.sort_by_ring {
            radar.sort_blips_by_ring();
        }
        radar
    }
}
