//! Building placement: validate everything, then commit everything.

use std::fmt;

use bevy::prelude::*;

use crate::buildings::{BuildingId, Footprint};
use crate::city::City;
use crate::grid::{GridPos, Occupancy, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementErrorKind {
    UnknownType,
    InsufficientFunds,
    FootprintBlocked,
}

impl PlacementErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementErrorKind::UnknownType => "unknown-type",
            PlacementErrorKind::InsufficientFunds => "insufficient-funds",
            PlacementErrorKind::FootprintBlocked => "footprint-blocked",
        }
    }
}

/// Why a placement was refused. No state changes when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// The key is not in the catalog.
    UnknownType(String),
    InsufficientFunds { cost: u64, available: u64 },
    /// `(x, y)` is the first footprint cell found to be occupied or off the grid.
    FootprintBlocked { x: usize, y: usize },
}

impl PlacementError {
    pub fn kind(&self) -> PlacementErrorKind {
        match self {
            PlacementError::UnknownType(_) => PlacementErrorKind::UnknownType,
            PlacementError::InsufficientFunds { .. } => PlacementErrorKind::InsufficientFunds,
            PlacementError::FootprintBlocked { .. } => PlacementErrorKind::FootprintBlocked,
        }
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::UnknownType(key) => {
                write!(f, "'{key}' is not a recognized building type")
            }
            PlacementError::InsufficientFunds { cost, available } => write!(
                f,
                "Not enough funds to place this building (cost {cost}, available {available})"
            ),
            PlacementError::FootprintBlocked { x, y } => {
                write!(f, "Cannot place building: tile ({x}, {y}) is occupied or does not exist")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

impl City {
    /// Place a building of type `key` with its footprint anchored at `(x, y)`.
    ///
    /// Checks run in order: catalog lookup, affordability, footprint. Only
    /// when all pass is any state touched: every footprint tile is occupied,
    /// the cost is debited once, the surrounding tiles are refreshed and, for
    /// roads, the vehicle graph is told.
    pub fn place_building(&mut self, x: usize, y: usize, key: &str) -> Result<BuildingId, PlacementError> {
        let Some(definition) = self.catalog.get(key).cloned() else {
            error!("{} is not a recognized building type", key);
            return Err(PlacementError::UnknownType(key.to_string()));
        };

        if !self.treasury.can_afford(definition.cost) {
            let err = PlacementError::InsufficientFunds {
                cost: definition.cost,
                available: self.treasury.balance(),
            };
            info!("Rejected {} at ({}, {}): {}", key, x, y, err);
            self.view.placement_rejected(&err);
            return Err(err);
        }

        let cells = match self.check_footprint(x, y, definition.footprint) {
            Ok(cells) => cells,
            Err(err) => {
                warn!("Rejected {} at ({}, {}): {}", key, x, y, err);
                self.view.placement_rejected(&err);
                return Err(err);
            }
        };

        let balance = match self.treasury.debit(definition.cost) {
            Ok(balance) => balance,
            Err(e) => {
                let err = PlacementError::InsufficientFunds {
                    cost: e.cost,
                    available: e.available,
                };
                self.view.placement_rejected(&err);
                return Err(err);
            }
        };

        let building = self.factory.create(x, y, &definition);
        let id = building.id;
        let origin = GridPos::new(x, y);
        for cell in &cells {
            if *cell == origin {
                continue;
            }
            if let Some(tile) = self.grid.get_mut(cell.x, cell.y) {
                tile.set_occupancy(Occupancy::Covered { origin });
            }
        }
        if let Some(tile) = self.grid.get_mut(x, y) {
            tile.set_occupancy(Occupancy::Origin(building));
        }

        self.view.funds_changed(balance);
        self.refresh_tiles(halo(origin, definition.footprint, self.grid.size()));

        if definition.category.is_road() {
            if let Some(placed) = self.grid.get(x, y).and_then(Tile::building) {
                for cell in &cells {
                    self.vehicles.update_tile(cell.x, cell.y, Some(placed));
                }
            }
        }

        info!(
            "Placed {} #{} at ({}, {}), funds now {}",
            key, id.0, x, y, balance
        );
        Ok(id)
    }

    /// Every footprint cell, if all exist and are free.
    fn check_footprint(
        &self,
        x: usize,
        y: usize,
        footprint: Footprint,
    ) -> Result<Vec<GridPos>, PlacementError> {
        // The scan stops at the first cell off the grid, so no footprint can
        // yield more cells than the grid holds.
        let mut cells = Vec::with_capacity(footprint.area().min(self.grid.len()));
        for dx in 0..footprint.width {
            for dy in 0..footprint.height {
                let (Some(cx), Some(cy)) = (x.checked_add(dx), y.checked_add(dy)) else {
                    return Err(PlacementError::FootprintBlocked { x, y });
                };
                match self.grid.get(cx, cy) {
                    Some(tile) if !tile.is_occupied() => cells.push(GridPos::new(cx, cy)),
                    _ => return Err(PlacementError::FootprintBlocked { x: cx, y: cy }),
                }
            }
        }
        Ok(cells)
    }
}

/// The footprint plus a one-tile border, clipped to the grid.
fn halo(origin: GridPos, footprint: Footprint, size: usize) -> Vec<GridPos> {
    if size == 0 {
        return Vec::new();
    }
    let x0 = origin.x.saturating_sub(1);
    let y0 = origin.y.saturating_sub(1);
    let x1 = origin.x.saturating_add(footprint.width).min(size - 1);
    let y1 = origin.y.saturating_add(footprint.height).min(size - 1);
    let mut cells = Vec::new();
    for x in x0..=x1 {
        for y in y0..=y1 {
            cells.push(GridPos::new(x, y));
        }
    }
    cells
}
