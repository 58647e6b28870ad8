//! City tunables.
//!
//! Compile-time defaults live as constants; [`CityConfig`] gathers them into a
//! resource so a host can override any of them (e.g. from a JSON file) before
//! the city is built.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Default edge length of the square tile grid.
pub const DEFAULT_CITY_SIZE: usize = 16;

/// Funds a new city starts with.
pub const STARTING_FUNDS: u64 = 1000;

/// Maximum hop distance a consumer may be from the power plant that serves it.
pub const POWER_SEARCH_RADIUS: u32 = 12;

/// Residents gained per tick by a powered residential building.
pub const RESIDENT_MOVE_IN_RATE: u32 = 1;

/// Residents lost per tick by an unpowered residential building.
pub const RESIDENT_MOVE_OUT_RATE: u32 = 1;

/// Seed mixed into building variant selection.
pub const DEFAULT_VARIANT_SEED: u64 = 42;

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Edge length of the grid in tiles. Fixed for the life of the city.
    pub size: usize,
    pub starting_funds: u64,
    pub power_search_radius: u32,
    pub resident_move_in_rate: u32,
    pub resident_move_out_rate: u32,
    pub variant_seed: u64,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_CITY_SIZE,
            starting_funds: STARTING_FUNDS,
            power_search_radius: POWER_SEARCH_RADIUS,
            resident_move_in_rate: RESIDENT_MOVE_IN_RATE,
            resident_move_out_rate: RESIDENT_MOVE_OUT_RATE,
            variant_seed: DEFAULT_VARIANT_SEED,
        }
    }
}

impl CityConfig {
    /// Parse a (possibly partial) config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_starting_funds(mut self, funds: u64) -> Self {
        self.starting_funds = funds;
        self
    }
}
