//! Builder methods for placing buildings and roads in integration tests.

use crate::city::City;
use crate::services::SimulationService;
use crate::SimulationPaused;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Buildings, roads, and services
    // -----------------------------------------------------------------------

    /// Place a building, panicking if the placement is refused.
    pub fn with_building(mut self, x: usize, y: usize, key: &str) -> Self {
        if let Err(e) = self.city_mut().place_building(x, y, key) {
            panic!("Failed to place {key} at ({x}, {y}): {e}");
        }
        self
    }

    /// Place a straight road from (x0,y0) to (x1,y1). The endpoints must share
    /// a row or a column.
    pub fn with_road(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        assert!(
            x0 == x1 || y0 == y1,
            "Roads must be straight: ({x0}, {y0}) -> ({x1}, {y1})"
        );
        for x in x0.min(x1)..=x0.max(x1) {
            for y in y0.min(y1)..=y0.max(y1) {
                self = self.with_building(x, y, "road");
            }
        }
        self
    }

    /// Place a straight run of power lines, same rules as [`TestCity::with_road`].
    pub fn with_power_line(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        assert!(
            x0 == x1 || y0 == y1,
            "Power lines must be straight: ({x0}, {y0}) -> ({x1}, {y1})"
        );
        for x in x0.min(x1)..=x0.max(x1) {
            for y in y0.min(y1)..=y0.max(y1) {
                self = self.with_building(x, y, "power-line");
            }
        }
        self
    }

    /// Register an extra service after the built-in ones.
    pub fn with_service(mut self, service: impl SimulationService) -> Self {
        self.city_mut().add_service(service);
        self
    }

    /// Replace the whole city, keeping the app.
    pub fn with_city(mut self, city: City) -> Self {
        self.app.insert_resource(city);
        self
    }

    /// Start paused: ticks leave the city untouched until `resume()`.
    pub fn paused(mut self) -> Self {
        self.set_paused(true);
        self
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.app.insert_resource(SimulationPaused(paused));
    }
}
