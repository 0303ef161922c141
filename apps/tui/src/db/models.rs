use sqlx::FromRow;

use crate::rows::RadarRow;

/// A radar row as stored in the `blip` table.
#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct BlipRecord {
    pub id: i64,
    pub name: Option<String>,
    pub quadrant: Option<String>,
    pub ring: Option<String>,
    pub description: Option<String>,
    pub is_new: Option<bool>,
}

impl From<BlipRecord> for RadarRow {
    fn from(record: BlipRecord) -> Self {
        Self {
            name: record.name,
            sector: record.quadrant,
            ring: record.ring,
            description: record.description,
            is_new: record.is_new,
        }
    }
}
