//! Per-tick behaviour of individual buildings.

use super::types::{Building, BuildingCategory};
use crate::city::City;
use crate::commands::CityCommands;
use crate::config::CityConfig;

impl Building {
    /// Run this building's logic for one tick. Effects are queued on
    /// `commands` and applied by the city right after this tile.
    pub fn step(&self, city: &City, commands: &mut CityCommands) {
        match self.category() {
            BuildingCategory::Residential => step_residential(self, city.config(), commands),
            BuildingCategory::Commercial
            | BuildingCategory::Industrial
            | BuildingCategory::Road
            | BuildingCategory::PowerPlant
            | BuildingCategory::PowerLine => {}
        }
    }
}

/// Residents move in while the building has power and drift away without it.
fn step_residential(building: &Building, config: &CityConfig, commands: &mut CityCommands) {
    let Some(residents) = building.residents else {
        return;
    };
    let next = if building.powered {
        residents
            .count
            .saturating_add(config.resident_move_in_rate)
            .min(residents.capacity)
    } else {
        residents.count.saturating_sub(config.resident_move_out_rate)
    };
    if next != residents.count {
        commands.set_residents(building.origin, next);
    }
}
