//! Hooks the simulation calls so a separate view layer can follow along.
//!
//! The simulation never reads anything back from these calls. Implementations
//! must be idempotent: the same tile may be refreshed several times per
//! mutation.

use crate::buildings::Building;
use crate::grid::{CityGrid, Tile};
use crate::placement::PlacementError;

pub trait CityView: Send + Sync {
    /// A tile (or something next to it) changed and should be redrawn.
    /// `grid` is provided so connective geometry can inspect neighbours;
    /// `grid.building_on(tile)` resolves covered footprint tiles.
    fn refresh_tile(&mut self, _tile: &Tile, _grid: &CityGrid) {}

    /// The fund balance changed after a successful placement.
    fn funds_changed(&mut self, _balance: u64) {}

    /// A placement was refused for a reason the player should see.
    fn placement_rejected(&mut self, _error: &PlacementError) {}

    /// A building was demolished; release whatever the view holds for it.
    fn dispose_building(&mut self, _building: &Building) {}
}

/// View that ignores every notification. Used by headless cities.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl CityView for NullView {}
