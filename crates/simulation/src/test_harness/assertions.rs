//! Assertion helpers for `TestCity` integration tests.

use crate::buildings::BuildingCategory;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert funds are exactly `amount`.
    pub fn assert_funds(&self, amount: u64) {
        let funds = self.funds();
        assert_eq!(funds, amount, "Expected funds == {amount}, got {funds}");
    }

    /// Assert population is between min and max (inclusive).
    pub fn assert_population_between(&self, min: u64, max: u64) {
        let population = self.population();
        assert!(
            population >= min && population <= max,
            "Expected population in [{min}, {max}], got {population}"
        );
    }

    /// Assert that a tile is covered by a building of the given category.
    pub fn assert_has_building(&self, x: usize, y: usize, category: BuildingCategory) {
        let found = self.building(x, y).map(|b| b.category());
        assert_eq!(
            found,
            Some(category),
            "Expected {category} at ({x}, {y}), found {found:?}"
        );
    }

    /// Assert that a tile has no building on it.
    pub fn assert_empty(&self, x: usize, y: usize) {
        let tile = self.tile(x, y);
        assert!(
            !tile.is_occupied(),
            "Expected ({x}, {y}) to be empty, found {:?}",
            self.building(x, y).map(|b| b.key().to_string())
        );
    }

    /// Assert that the building covering a tile is powered.
    pub fn assert_powered(&self, x: usize, y: usize) {
        let powered = self.building(x, y).map(|b| b.powered);
        assert_eq!(
            powered,
            Some(true),
            "Expected powered building at ({x}, {y}), found {powered:?}"
        );
    }

    /// Assert that the building covering a tile is not powered.
    pub fn assert_unpowered(&self, x: usize, y: usize) {
        let powered = self.building(x, y).map(|b| b.powered);
        assert_eq!(
            powered,
            Some(false),
            "Expected unpowered building at ({x}, {y}), found {powered:?}"
        );
    }

    /// Assert that the cached stats agree with a fresh read of the city.
    pub fn assert_stats_consistent(&self) {
        let stats = self.stats();
        let population = self.population();
        assert_eq!(
            stats.population, population,
            "Stats population {} disagrees with city population {population}",
            stats.population
        );
    }
}
