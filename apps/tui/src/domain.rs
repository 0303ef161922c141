use std::f64::consts::TAU;

use indexmap::IndexMap;

use crate::colour::Colour;
use crate::error::LayoutError;
use crate::layout::geometry::{Point, RingBand};

/// Lookup key for a display name: ASCII word characters only, lowercased.
pub fn derive_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Index of a ring in its radar's ring registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RingId(usize);

impl RingId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a sector in its radar's ordered sector map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorId(usize);

impl SectorId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub name: String,
    /// Distance rank from the centre, 1 being innermost.
    pub order: u32,
    pub colour: Colour,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub name: String,
    id: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub colour: Colour,
    blips: Vec<Blip>,
}

impl Sector {
    /// Unique key within the radar, see [`Radar::add_sector`].
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn blips(&self) -> &[Blip] {
        &self.blips
    }

    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blip {
    pub name: String,
    pub number: Option<u32>,
    pub ring: RingId,
    pub sector: SectorId,
    pub description: String,
    pub is_new: bool,
    /// Set once by the placement pass.
    pub coordinates: Option<Point>,
}

impl Blip {
    pub const fn new(name: String, ring: RingId, sector: SectorId) -> Self {
        Self {
            name,
            number: None,
            ring,
            sector,
            description: String::new(),
            is_new: false,
            coordinates: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    #[must_use]
    pub const fn with_new_flag(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    pub fn id(&self) -> String {
        derive_id(&self.name)
    }
}

/// Band for every ring in a registry, computed against one fixed ring count.
#[derive(Debug, Clone, PartialEq)]
pub struct RingBands {
    ring_count: usize,
    bands: Vec<RingBand>,
}

impl RingBands {
    pub fn get(&self, ring: RingId) -> Option<RingBand> {
        self.bands.get(ring.index()).copied()
    }

    pub const fn ring_count(&self) -> usize {
        self.ring_count
    }
}

/// The aggregate root: sectors in first-seen order, each owning its blips,
/// plus a registry of rings that blips refer to by index.
#[derive(Debug, Clone, Default)]
pub struct Radar {
    rings: Vec<Ring>,
    sectors: IndexMap<String, Sector>,
}

impl Radar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a ring, or returns the existing one with the same name.
    pub fn add_ring(&mut self, name: impl Into<String>, order: u32, colour: Colour) -> RingId {
        let name = name.into();
        if let Some(existing) = self.ring_by_name(&name) {
            return existing;
        }
        self.rings.push(Ring {
            name,
            order,
            colour,
        });
        RingId(self.rings.len() - 1)
    }

    pub fn ring_by_name(&self, name: &str) -> Option<RingId> {
        self.rings
            .iter()
            .position(|ring| ring.name == name)
            .map(RingId)
    }

    pub fn ring(&self, id: RingId) -> Option<&Ring> {
        self.rings.get(id.index())
    }

    pub fn ring_mut(&mut self, id: RingId) -> Option<&mut Ring> {
        self.rings.get_mut(id.index())
    }

    pub fn ring_ids(&self) -> impl Iterator<Item = RingId> {
        (0..self.rings.len()).map(RingId)
    }

    /// Every registered ring, including ones no blip refers to.
    pub fn ring_registry(&self) -> &[Ring] {
        &self.rings
    }

    pub fn max_ring_order(&self) -> u32 {
        self.rings.iter().map(|ring| ring.order).max().unwrap_or(0)
    }

    /// Registers a sector, or returns the existing one with the same name.
    ///
    /// Sector ids must stay unique: when a new name normalises to an id that
    /// another sector already holds, the new id gets a `-2`, `-3`, ... suffix.
    pub fn add_sector(&mut self, name: impl Into<String>, colour: Colour) -> SectorId {
        let name = name.into();
        if let Some(index) = self.sectors.get_index_of(&name) {
            return SectorId(index);
        }

        let base = derive_id(&name);
        let mut id = base.clone();
        let mut suffix = 2;
        while self.sector_by_id(&id).is_some() {
            id = format!("{base}-{suffix}");
            suffix += 1;
        }
        if id != base {
            tracing::warn!(sector = %name, id = %id, "sector id collision, disambiguated");
        }

        let (index, _) = self.sectors.insert_full(
            name.clone(),
            Sector {
                name,
                id,
                start_angle: 0.0,
                end_angle: 0.0,
                colour,
                blips: Vec::new(),
            },
        );
        SectorId(index)
    }

    pub fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get_index(id.index()).map(|(_, sector)| sector)
    }

    pub fn sector_mut(&mut self, id: SectorId) -> Option<&mut Sector> {
        self.sectors
            .get_index_mut(id.index())
            .map(|(_, sector)| sector)
    }

    pub fn sector_by_name(&self, name: &str) -> Option<SectorId> {
        self.sectors.get_index_of(name).map(SectorId)
    }

    pub fn sector_by_id(&self, id: &str) -> Option<SectorId> {
        self.sectors
            .values()
            .position(|sector| sector.id == id)
            .map(SectorId)
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.values()
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Appends a blip to the sector it names.
    pub fn add_blip(&mut self, blip: Blip) -> Result<(), LayoutError> {
        if self.ring(blip.ring).is_none() {
            return Err(LayoutError::UnknownRing(blip.ring.index()));
        }
        let sector_index = blip.sector.index();
        let sector = self
            .sector_mut(blip.sector)
            .ok_or(LayoutError::UnknownSector(sector_index))?;
        sector.blips.push(blip);
        Ok(())
    }

    /// All blips, sector by sector in sector order.
    pub fn blips(&self) -> impl Iterator<Item = &Blip> {
        self.sectors.values().flat_map(|sector| sector.blips.iter())
    }

    pub fn blip_count(&self) -> usize {
        self.sectors.values().map(|sector| sector.blips.len()).sum()
    }

    /// Rings referenced by at least one blip, in the order they are first met
    /// while walking [`Radar::blips`]. Not sorted by `order`.
    pub fn rings(&self) -> Vec<&Ring> {
        let mut seen: Vec<RingId> = Vec::new();
        for blip in self.blips() {
            if !seen.contains(&blip.ring) {
                seen.push(blip.ring);
            }
        }
        seen.into_iter().filter_map(|id| self.ring(id)).collect()
    }

    /// Stable sort of every sector's blips by their ring's order.
    pub fn sort_blips_by_ring(&mut self) {
        let orders: Vec<u32> = self.rings.iter().map(|ring| ring.order).collect();
        for sector in self.sectors.values_mut() {
            sector
                .blips
                .sort_by_key(|blip| orders.get(blip.ring.index()).copied().unwrap_or(u32::MAX));
        }
    }

    /// Shares the full circle equally between sectors, in sector order,
    /// starting at angle 0.
    pub fn set_sector_angles(&mut self) -> Result<(), LayoutError> {
        if self.sectors.is_empty() {
            return Err(LayoutError::EmptyRadar);
        }
        #[allow(clippy::cast_precision_loss)]
        let span = TAU / self.sectors.len() as f64;
        let last = self.sectors.len() - 1;

        for (index, sector) in self.sectors.values_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let start = index as f64 * span;
            sector.start_angle = start;
            sector.end_angle = if index == last { TAU } else { start + span };
        }
        Ok(())
    }

    /// Number of equal-width bands the radius is split into.
    ///
    /// Counted over referenced rings; a ring whose order exceeds that count
    /// widens it so no band reaches past the maximum radius.
    pub fn ring_count(&self) -> usize {
        let referenced = self.rings();
        let highest = referenced.iter().map(|ring| ring.order).max().unwrap_or(0);
        referenced.len().max(highest as usize)
    }

    /// Bands for the whole registry, using one ring count for the pass.
    pub fn ring_bands(&self, max_radius: f64) -> RingBands {
        let ring_count = self.ring_count();
        let bands = self
            .rings
            .iter()
            .map(|ring| RingBand::for_order(ring.order, ring_count, max_radius))
            .collect();
        RingBands { ring_count, bands }
    }

    pub(crate) fn sectors_mut(&mut self) -> impl Iterator<Item = &mut Sector> {
        self.sectors.values_mut()
    }
}

impl Sector {
    pub(crate) fn blips_mut(&mut self) -> &mut [Blip] {
        &mut self.blips
    }
}
