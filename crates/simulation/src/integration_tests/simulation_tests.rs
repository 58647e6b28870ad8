use std::any::Any;

use crate::city::City;
use crate::config::CityConfig;
use crate::services::SimulationService;
use crate::test_harness::TestCity;

/// Records the population it observes each time it is stepped.
#[derive(Default)]
struct PopulationProbe {
    seen: Vec<u64>,
}

impl SimulationService for PopulationProbe {
    fn name(&self) -> &'static str {
        "population-probe"
    }

    fn step(&mut self, city: &mut City) {
        self.seen.push(city.population());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Tries to start a nested tick from inside its own step.
#[derive(Default)]
struct NestedSimulate {
    steps: u32,
}

impl SimulationService for NestedSimulate {
    fn name(&self) -> &'static str {
        "nested-simulate"
    }

    fn step(&mut self, city: &mut City) {
        self.steps += 1;
        city.simulate(1);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn powered_house() -> TestCity {
    TestCity::with_config(CityConfig::default().with_starting_funds(10_000))
        .with_building(0, 0, "power-plant")
        .with_building(2, 0, "residential")
}

#[test]
fn test_services_step_before_tiles() {
    let mut city = powered_house().with_service(PopulationProbe::default());
    city.tick(3);

    let probe = city
        .city()
        .service::<PopulationProbe>()
        .expect("probe registered");
    // Each tick the probe sees the population from before that tick's tiles ran.
    assert_eq!(probe.seen, vec![0, 1, 2]);
    assert_eq!(city.population(), 3);
}

#[test]
fn test_residents_move_in_up_to_capacity() {
    let mut city = powered_house();
    city.tick(40);
    assert_eq!(city.population(), 16);
    city.assert_stats_consistent();
}

#[test]
fn test_residents_leave_when_power_goes() {
    let mut city = powered_house();
    city.tick(10);
    assert_eq!(city.population(), 10);

    city.city_mut().bulldoze(0, 0);
    city.tick(4);
    assert_eq!(city.population(), 6);
    city.tick(20);
    assert_eq!(city.population(), 0);
}

#[test]
fn test_population_tracks_placed_and_removed_buildings() {
    let mut city = TestCity::with_config(CityConfig::default().with_starting_funds(10_000))
        .with_building(4, 4, "power-plant")
        .with_building(2, 4, "residential")
        .with_building(6, 4, "residential");
    city.tick(5);
    assert_eq!(city.population(), 10);

    let removed = city.building(6, 5).map(|b| b.resident_count()).unwrap_or(0) as u64;
    let before = city.population();
    city.city_mut().bulldoze(6, 5);
    assert_eq!(city.population(), before - removed);

    let sum: u64 = city
        .city()
        .buildings()
        .map(|b| b.resident_count() as u64)
        .sum();
    assert_eq!(city.population(), sum);
}

#[test]
fn test_simulate_multiple_steps_is_one_time_unit() {
    let mut city = City::new(CityConfig::default().with_starting_funds(10_000));
    city.place_building(0, 0, "power-plant").expect("placed");
    city.place_building(2, 0, "residential").expect("placed");

    city.simulate(5);
    assert_eq!(city.sim_time(), 1);
    assert_eq!(city.population(), 5);
}

#[test]
fn test_empty_city_ticks_quietly() {
    let mut city = TestCity::new();
    city.tick(10);
    assert_eq!(city.sim_time(), 10);
    assert_eq!(city.population(), 0);
    city.assert_funds(1000);
}

#[test]
fn test_nested_simulate_is_refused() {
    let mut city = City::new(CityConfig::default().with_starting_funds(10_000));
    city.place_building(0, 0, "power-plant").expect("placed");
    city.place_building(2, 0, "residential").expect("placed");
    city.add_service(NestedSimulate::default());

    city.simulate(1);
    assert_eq!(city.sim_time(), 1);
    // Only the outer tick moved anyone in.
    assert_eq!(city.population(), 1);
    assert_eq!(city.service::<NestedSimulate>().map(|s| s.steps), Some(1));

    // The guard is released once the outer tick ends.
    city.simulate(2);
    assert_eq!(city.sim_time(), 2);
    assert_eq!(city.population(), 3);
    assert_eq!(city.service::<NestedSimulate>().map(|s| s.steps), Some(3));
}
