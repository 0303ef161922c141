// Radar layout engine: grouping rows into sectors and rings, sharing out
// sector angles and placing blips without overlap.
pub mod colour;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod export;
pub mod layout;
pub mod rows;

pub use domain::{Blip, Radar, Ring, Sector};
pub use error::{InputError, LayoutError};
