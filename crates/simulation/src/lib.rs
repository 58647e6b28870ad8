use bevy::prelude::*;

pub mod buildings;
pub mod city;
pub mod commands;
pub mod config;
pub mod grid;
pub mod placement;
pub mod roads;
pub mod services;
pub mod simulation_sets;
pub mod spatial_search;
pub mod stats;
pub mod treasury;
pub mod view;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use city::City;
pub use config::CityConfig;
pub use grid::{GridPos, Tile};
pub use placement::{PlacementError, PlacementErrorKind};
pub use simulation_sets::SimulationSet;

/// While `true`, fixed ticks leave the city untouched.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationPaused(pub bool);

/// Advance the city by one tick per fixed update.
pub fn step_city(mut city: ResMut<City>, paused: Res<SimulationPaused>) {
    if paused.0 {
        return;
    }
    city.simulate(1);
}

/// Registers the [`City`] resource and drives it from `FixedUpdate`.
///
/// If a `City` was inserted before the plugin it is kept; otherwise one is
/// built from the `CityConfig` resource (or the defaults).
pub struct CityPlugin;

impl Plugin for CityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityConfig>()
            .init_resource::<SimulationPaused>()
            .init_resource::<stats::CityStats>();

        if !app.world().contains_resource::<City>() {
            let config = app.world().resource::<CityConfig>().clone();
            app.insert_resource(City::new(config));
        }

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        )
        .add_systems(FixedUpdate, step_city.in_set(SimulationSet::Simulation))
        .add_systems(
            FixedUpdate,
            stats::update_stats.in_set(SimulationSet::PostSim),
        );
    }
}
