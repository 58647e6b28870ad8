//! End-to-end scenarios driven purely through the public `City` API.
//!
//! Run: cargo test -p simulation --test city_scenarios

use simulation::buildings::{BuildingCatalog, BuildingCategory};
use simulation::config::CityConfig;
use simulation::{City, GridPos, PlacementErrorKind};

fn is_power_plant(city: &City, pos: GridPos) -> bool {
    city.building_at(pos.x, pos.y).map(|b| b.category()) == Some(BuildingCategory::PowerPlant)
}

#[test]
fn residential_block_then_blocked_retry() {
    let mut city = City::new(CityConfig::default());
    assert_eq!(city.size(), 16);
    assert_eq!(city.funds(), 1000);

    city.place_building(12, 12, "residential")
        .expect("fits on a fresh grid");
    assert_eq!(city.funds(), 500);

    let occupied: Vec<_> = city
        .grid()
        .iter()
        .filter(|t| t.is_occupied())
        .map(|t| (t.x, t.y))
        .collect();
    assert_eq!(occupied, vec![(12, 12), (12, 13), (13, 12), (13, 13)]);

    let err = city
        .place_building(12, 12, "residential")
        .expect_err("footprint is taken");
    assert_eq!(err.kind(), PlacementErrorKind::FootprintBlocked);
    assert_eq!(err.kind().as_str(), "footprint-blocked");
    assert_eq!(city.funds(), 500);
}

#[test]
fn no_power_plant_near_origin_of_empty_grid() {
    let city = City::new(CityConfig::default());
    let found = city.find_tile(GridPos::new(0, 0), |t| is_power_plant(&city, t.pos()), 5);
    assert!(found.is_none());
}

#[test]
fn growing_town_reaches_full_occupancy() {
    let mut city = City::new(CityConfig::default().with_starting_funds(5_000)).with_name("Elmstead");
    city.place_building(6, 6, "power-plant").expect("placed");
    for (x, y) in [(4, 6), (8, 6), (6, 4), (6, 8)] {
        city.place_building(x, y, "residential").expect("placed");
    }
    assert_eq!(city.funds(), 5_000 - 750 - 4 * 500);

    for _ in 0..20 {
        city.simulate(1);
    }
    assert_eq!(city.sim_time(), 20);
    assert_eq!(city.population(), 4 * 16);

    // Knock out the plant; everyone leaves eventually.
    assert!(city.bulldoze(7, 7));
    city.simulate(16);
    assert_eq!(city.population(), 0);
    assert_eq!(city.sim_time(), 21);
}

#[test]
fn custom_catalog_from_json() {
    let json = r#"[
        { "key": "cabin", "name": "Cabin", "category": "residential", "cost": 30,
          "residents_capacity": 3, "power_demand": 1 },
        { "key": "generator", "name": "Generator", "category": "power-plant", "cost": 100,
          "power_supply": 2 }
    ]"#;
    let catalog = BuildingCatalog::from_json(json).expect("valid catalog");
    let mut city = City::new(CityConfig::default().with_starting_funds(200)).with_catalog(catalog);

    city.place_building(0, 0, "generator").expect("placed");
    city.place_building(1, 0, "cabin").expect("placed");
    city.place_building(0, 1, "cabin").expect("placed");
    assert_eq!(city.funds(), 40);

    let err = city.place_building(5, 5, "residential").expect_err("not in this catalog");
    assert_eq!(err.kind(), PlacementErrorKind::UnknownType);

    city.simulate(10);
    assert_eq!(city.population(), 6);
}

#[test]
fn config_from_json_fills_defaults() {
    let config = CityConfig::from_json(r#"{ "size": 8, "starting_funds": 25 }"#).expect("valid");
    let mut city = City::new(config);
    assert_eq!(city.size(), 8);

    city.place_building(7, 7, "road").expect("placed");
    assert_eq!(city.funds(), 0);
    let err = city.place_building(0, 0, "road").expect_err("broke");
    assert_eq!(err.kind(), PlacementErrorKind::InsufficientFunds);
}
