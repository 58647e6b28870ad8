//! Query and simulation-tick methods for `TestCity`.

use bevy::prelude::*;

use crate::buildings::Building;
use crate::city::City;
use crate::grid::Tile;
use crate::stats::CityStats;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system entirely, which avoids
    /// issues with `MinimalPlugins` not advancing virtual time between
    /// updates.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn city(&self) -> &City {
        self.app.world().resource::<City>()
    }

    pub fn city_mut(&mut self) -> Mut<'_, City> {
        self.app.world_mut().resource_mut::<City>()
    }

    /// Stats as of the last tick (not recomputed here).
    pub fn stats(&self) -> &CityStats {
        self.app.world().resource::<CityStats>()
    }

    pub fn funds(&self) -> u64 {
        self.city().funds()
    }

    pub fn population(&self) -> u64 {
        self.city().population()
    }

    pub fn sim_time(&self) -> u64 {
        self.city().sim_time()
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        self.city()
            .get_tile(x, y)
            .unwrap_or_else(|| panic!("Tile ({x}, {y}) is out of range"))
    }

    pub fn building(&self, x: usize, y: usize) -> Option<&Building> {
        self.city().building_at(x, y)
    }

    pub fn building_count(&self) -> usize {
        self.city().buildings().count()
    }

    pub fn occupied_tile_count(&self) -> usize {
        self.city().grid().iter().filter(|t| t.is_occupied()).count()
    }
}
