//! # TestCity: headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `CityPlugin`
//! for running integration tests without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::city::City;
use crate::config::CityConfig;
use crate::CityPlugin;

/// A headless Bevy App wrapping `CityPlugin` for integration testing.
///
/// Use builder methods to set up city state, then call `tick()` to advance the
/// simulation and query/assert on the resulting state.
pub struct TestCity {
    app: App,
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new **empty** city with the default configuration
    /// (16x16 grid, 1000 funds, standard catalog, power service).
    pub fn new() -> Self {
        Self::with_config(CityConfig::default())
    }

    /// Create an empty city from an explicit configuration.
    pub fn with_config(config: CityConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.add_plugins(CityPlugin);

        // Run one update so the schedules are initialised.
        app.update();

        Self { app }
    }

    /// Wrap an already-built [`City`]. The plugin keeps it instead of
    /// building its own.
    pub fn from_city(city: City) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(city.config().clone());
        app.insert_resource(city);
        app.add_plugins(CityPlugin);
        app.update();
        Self { app }
    }

    /// Direct access to the underlying app.
    pub fn app(&mut self) -> &mut App {
        &mut self.app
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}
