use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingCategory;
use crate::city::City;

/// Snapshot of city-wide numbers, refreshed after every fixed tick.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStats {
    pub population: u64,
    pub funds: u64,
    pub sim_time: u64,
    pub residential_buildings: u32,
    pub commercial_buildings: u32,
    pub industrial_buildings: u32,
    pub road_tiles: u32,
    pub power_plants: u32,
    pub powered_buildings: u32,
    pub unpowered_buildings: u32,
}

impl CityStats {
    pub fn collect(city: &City) -> Self {
        let mut stats = CityStats {
            population: city.population(),
            funds: city.funds(),
            sim_time: city.sim_time(),
            ..Default::default()
        };
        for building in city.buildings() {
            match building.category() {
                BuildingCategory::Residential => stats.residential_buildings += 1,
                BuildingCategory::Commercial => stats.commercial_buildings += 1,
                BuildingCategory::Industrial => stats.industrial_buildings += 1,
                BuildingCategory::Road => {
                    stats.road_tiles += building.definition.footprint.area() as u32
                }
                BuildingCategory::PowerPlant => stats.power_plants += 1,
                BuildingCategory::PowerLine => {}
            }
            if building.definition.is_power_consumer() {
                if building.powered {
                    stats.powered_buildings += 1;
                } else {
                    stats.unpowered_buildings += 1;
                }
            }
        }
        stats
    }
}

pub fn update_stats(city: Res<City>, mut stats: ResMut<CityStats>) {
    let next = CityStats::collect(&city);
    if *stats != next {
        *stats = next;
    }
}
