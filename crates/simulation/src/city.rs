//! The city: owner of the grid, treasury, services and simulation clock.

use std::collections::BTreeSet;

use bevy::prelude::*;

use crate::buildings::{Building, BuildingCatalog, BuildingFactory};
use crate::commands::{CityCommand, CityCommands};
use crate::config::CityConfig;
use crate::grid::{CityGrid, GridPos, Occupancy, Tile};
use crate::roads::{RoadGraph, VehicleGraphAdapter};
use crate::services::{PowerService, SimulationService};
use crate::treasury::Treasury;
use crate::view::{CityView, NullView};

#[derive(Resource)]
pub struct City {
    name: String,
    config: CityConfig,
    pub(crate) grid: CityGrid,
    pub(crate) catalog: BuildingCatalog,
    pub(crate) factory: BuildingFactory,
    pub(crate) treasury: Treasury,
    services: Vec<Box<dyn SimulationService>>,
    pub(crate) vehicles: Box<dyn VehicleGraphAdapter>,
    pub(crate) view: Box<dyn CityView>,
    sim_time: u64,
    in_tick: bool,
}

impl City {
    /// A city with the standard catalog, the power service and a [`RoadGraph`].
    pub fn new(config: CityConfig) -> Self {
        let mut city = Self {
            name: "My City".to_string(),
            grid: CityGrid::new(config.size),
            catalog: BuildingCatalog::standard(),
            factory: BuildingFactory::new(config.variant_seed),
            treasury: Treasury::new(config.starting_funds),
            services: vec![Box::new(PowerService::default())],
            vehicles: Box::new(RoadGraph::default()),
            view: Box::new(NullView),
            sim_time: 0,
            in_tick: false,
            config,
        };
        city.refresh_all();
        info!(
            "Created city '{}' ({}x{}, funds {})",
            city.name,
            city.grid.size(),
            city.grid.size(),
            city.treasury.balance()
        );
        city
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_catalog(mut self, catalog: BuildingCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Attach a view and give it an initial refresh of every tile.
    pub fn with_view(mut self, view: impl CityView + 'static) -> Self {
        self.view = Box::new(view);
        self.refresh_all();
        self
    }

    pub fn with_vehicle_graph(mut self, graph: impl VehicleGraphAdapter) -> Self {
        self.vehicles = Box::new(graph);
        self
    }

    /// Replace the registered services. Order is execution order.
    pub fn with_services(mut self, services: Vec<Box<dyn SimulationService>>) -> Self {
        self.services = services;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &CityGrid {
        &self.grid
    }

    pub fn catalog(&self) -> &BuildingCatalog {
        &self.catalog
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    pub fn funds(&self) -> u64 {
        self.treasury.balance()
    }

    /// Number of completed `simulate` calls.
    pub fn sim_time(&self) -> u64 {
        self.sim_time
    }

    pub fn vehicle_graph(&self) -> &dyn VehicleGraphAdapter {
        self.vehicles.as_ref()
    }

    /// The vehicle graph as its concrete type, if it is a `T`.
    pub fn vehicle_graph_as<T: VehicleGraphAdapter>(&self) -> Option<&T> {
        self.vehicles.as_any().downcast_ref::<T>()
    }

    /// Bounds-checked tile lookup; out of range is `None`, never an error.
    pub fn get_tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.grid.get(x, y)
    }

    /// Every tile in row-major order (x outer, y inner).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter()
    }

    /// The up-to-four orthogonal neighbours of `(x, y)` that exist.
    pub fn get_tile_neighbors(&self, x: usize, y: usize) -> Vec<&Tile> {
        let (neighbors, count) = self.grid.neighbors4(x, y);
        neighbors[..count]
            .iter()
            .filter_map(|p| self.grid.get(p.x, p.y))
            .collect()
    }

    /// The building covering `(x, y)`, whether or not it is the origin tile.
    pub fn building_at(&self, x: usize, y: usize) -> Option<&Building> {
        self.grid.building_at(x, y)
    }

    pub fn building_on(&self, tile: &Tile) -> Option<&Building> {
        self.grid.building_on(tile)
    }

    pub fn building_mut(&mut self, pos: GridPos) -> Option<&mut Building> {
        let origin = self.grid.get(pos.x, pos.y)?.origin()?;
        self.grid.get_mut(origin.x, origin.y)?.building_mut()
    }

    /// Every placed building, once each, in row-major order of origin.
    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.grid.iter().filter_map(Tile::building)
    }

    /// Sum of residents over all buildings. Recomputed on every call.
    pub fn population(&self) -> u64 {
        self.buildings().map(|b| b.resident_count() as u64).sum()
    }

    pub fn services(&self) -> impl Iterator<Item = &(dyn SimulationService + 'static)> + '_ {
        self.services.iter().map(|s| s.as_ref())
    }

    /// First registered service of type `T`.
    pub fn service<T: SimulationService>(&self) -> Option<&T> {
        self.services
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    pub fn add_service(&mut self, service: impl SimulationService) {
        self.services.push(Box::new(service));
    }

    // -----------------------------------------------------------------------
    // Demolition
    // -----------------------------------------------------------------------

    /// Remove the building covering `(x, y)` along with its whole footprint.
    /// Returns `false` (and changes nothing) if the tile is empty or absent.
    pub fn bulldoze(&mut self, x: usize, y: usize) -> bool {
        let Some(origin) = self.grid.get(x, y).and_then(Tile::origin) else {
            return false;
        };
        let Some(building) = self.grid.get(origin.x, origin.y).and_then(Tile::building) else {
            warn!(
                "Tile ({}, {}) points at ({}, {}) which holds no building",
                x, y, origin.x, origin.y
            );
            return false;
        };
        let cells = building.footprint_cells();

        if building.category().is_road() {
            for cell in &cells {
                self.vehicles.update_tile(cell.x, cell.y, None);
            }
        }

        let mut removed = None;
        for cell in &cells {
            let Some(tile) = self.grid.get_mut(cell.x, cell.y) else {
                continue;
            };
            if tile.origin() != Some(origin) {
                continue;
            }
            if let Some(Occupancy::Origin(b)) = tile.clear() {
                removed = Some(b);
            }
        }

        if let Some(building) = &removed {
            self.view.dispose_building(building);
            info!(
                "Bulldozed {} #{} at ({}, {})",
                building.key(),
                building.id.0,
                origin.x,
                origin.y
            );
        }

        let mut dirty = BTreeSet::new();
        for cell in &cells {
            dirty.insert(*cell);
            let (neighbors, count) = self.grid.neighbors4(cell.x, cell.y);
            dirty.extend(neighbors[..count].iter().copied());
        }
        self.refresh_tiles(dirty);
        true
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run `steps` ticks. Each tick steps every service in registration
    /// order, then every tile's building in row-major order. `sim_time`
    /// advances once per call, not once per step.
    pub fn simulate(&mut self, steps: u32) {
        if self.in_tick {
            warn!("simulate() called while a tick is running; ignoring");
            return;
        }
        self.in_tick = true;
        for _ in 0..steps {
            self.step_services();
            self.step_tiles();
        }
        self.in_tick = false;
        self.sim_time += 1;
    }

    fn step_services(&mut self) {
        let mut services = std::mem::take(&mut self.services);
        for service in services.iter_mut() {
            service.step(self);
        }
        // Anything registered mid-tick starts running next tick.
        services.append(&mut self.services);
        self.services = services;
    }

    fn step_tiles(&mut self) {
        let mut commands = CityCommands::default();
        let size = self.grid.size();
        for x in 0..size {
            for y in 0..size {
                if let Some(building) = self.grid.get(x, y).and_then(Tile::building) {
                    building.step(self, &mut commands);
                }
                if !commands.is_empty() {
                    self.apply_commands(&mut commands);
                }
            }
        }
    }

    pub fn apply_commands(&mut self, commands: &mut CityCommands) {
        for command in commands.drain() {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: CityCommand) {
        match command {
            CityCommand::SetResidents { origin, count } => self.set_residents(origin, count),
            CityCommand::SetPowered { origin, powered } => self.set_powered(origin, powered),
            CityCommand::PlaceBuilding { x, y, key } => {
                if let Err(e) = self.place_building(x, y, &key) {
                    debug!("Queued placement of {} at ({}, {}) failed: {}", key, x, y, e);
                }
            }
            CityCommand::Bulldoze { x, y } => {
                self.bulldoze(x, y);
            }
        }
    }

    /// Set a residential building's resident count, clamped to capacity.
    pub fn set_residents(&mut self, pos: GridPos, count: u32) {
        let Some(building) = self.building_mut(pos) else {
            return;
        };
        let origin = building.origin;
        let Some(residents) = building.residents.as_mut() else {
            return;
        };
        let count = count.min(residents.capacity);
        if residents.count != count {
            residents.count = count;
            self.refresh_tiles([origin]);
        }
    }

    pub fn set_powered(&mut self, pos: GridPos, powered: bool) {
        let Some(building) = self.building_mut(pos) else {
            return;
        };
        if building.powered != powered {
            building.powered = powered;
            let origin = building.origin;
            self.refresh_tiles([origin]);
        }
    }

    // -----------------------------------------------------------------------
    // View refresh
    // -----------------------------------------------------------------------

    pub(crate) fn refresh_tiles(&mut self, cells: impl IntoIterator<Item = GridPos>) {
        for cell in cells {
            if let Some(tile) = self.grid.get(cell.x, cell.y) {
                self.view.refresh_tile(tile, &self.grid);
            }
        }
    }

    fn refresh_all(&mut self) {
        for tile in self.grid.iter() {
            self.view.refresh_tile(tile, &self.grid);
        }
    }
}

impl Default for City {
    fn default() -> Self {
        Self::new(CityConfig::default())
    }
}
