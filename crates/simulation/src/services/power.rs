use std::any::Any;
use std::collections::BTreeMap;

use bevy::prelude::*;

use super::SimulationService;
use crate::buildings::Building;
use crate::city::City;
use crate::grid::{GridPos, Tile};

/// Totals from the most recent power pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerReport {
    /// Units produced by all plants.
    pub supply: u64,
    /// Units requested by all consumers.
    pub demand: u64,
    /// Units actually delivered.
    pub served: u64,
    pub unserved_buildings: u32,
}

/// Distributes plant output to consumers reachable through conductive tiles.
///
/// Consumers are served in row-major order of their origin. Each one takes
/// its whole demand from the nearest plant (by hop distance) that still has
/// enough spare capacity, searching no further than the configured radius.
#[derive(Debug, Default, Clone)]
pub struct PowerService {
    report: PowerReport,
}

impl PowerService {
    pub fn report(&self) -> PowerReport {
        self.report
    }
}

fn is_plant_with_capacity(
    city: &City,
    tile: &Tile,
    remaining: &BTreeMap<GridPos, u32>,
    demand: u32,
) -> bool {
    city.building_on(tile).is_some_and(|b| {
        b.definition.is_power_source() && remaining.get(&b.origin).is_some_and(|r| *r >= demand)
    })
}

fn conducts(city: &City, tile: &Tile) -> bool {
    city.building_on(tile)
        .is_some_and(|b| b.category().conducts_power())
}

impl SimulationService for PowerService {
    fn name(&self) -> &'static str {
        "power"
    }

    fn step(&mut self, city: &mut City) {
        let radius = city.config().power_search_radius as usize;

        let mut remaining: BTreeMap<GridPos, u32> = city
            .buildings()
            .filter(|b| b.definition.is_power_source())
            .map(|b| (b.origin, b.definition.power_supply))
            .collect();
        let consumers: Vec<(GridPos, u32)> = city
            .buildings()
            .filter(|b| b.definition.is_power_consumer())
            .map(|b: &Building| (b.origin, b.definition.power_demand))
            .collect();

        let mut report = PowerReport {
            supply: remaining
                .values()
                .fold(0u64, |acc, s| acc.saturating_add(u64::from(*s))),
            ..Default::default()
        };
        let mut assignments = Vec::with_capacity(consumers.len());

        for (origin, demand) in consumers {
            report.demand = report.demand.saturating_add(u64::from(demand));
            let plant = city
                .find_tile_through(
                    origin,
                    |t| is_plant_with_capacity(city, t, &remaining, demand),
                    |t| conducts(city, t),
                    radius,
                )
                .and_then(Tile::origin);

            let powered = match plant.and_then(|p| remaining.get_mut(&p)) {
                Some(spare) => {
                    *spare -= demand;
                    report.served = report.served.saturating_add(u64::from(demand));
                    true
                }
                None => {
                    report.unserved_buildings = report.unserved_buildings.saturating_add(1);
                    false
                }
            };
            assignments.push((origin, powered));
        }

        for (origin, powered) in assignments {
            city.set_powered(origin, powered);
        }

        if report.unserved_buildings > 0 {
            debug!(
                "Power: {} building(s) without power (demand {}, supply {})",
                report.unserved_buildings, report.demand, report.supply
            );
        }
        self.report = report;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
