use crate::buildings::BuildingCategory;
use crate::config::CityConfig;
use crate::grid::GridPos;
use crate::placement::{PlacementError, PlacementErrorKind};
use crate::test_harness::TestCity;

#[test]
fn test_residential_on_fresh_city_then_blocked_retry() {
    let mut city = TestCity::new();
    city.assert_funds(1000);

    let id = city
        .city_mut()
        .place_building(12, 12, "residential")
        .expect("first placement fits");
    city.assert_funds(500);

    for (x, y) in [(12, 12), (13, 12), (12, 13), (13, 13)] {
        city.assert_has_building(x, y, BuildingCategory::Residential);
        assert_eq!(city.building(x, y).map(|b| b.id), Some(id));
    }
    assert_eq!(city.occupied_tile_count(), 4);

    let err = city
        .city_mut()
        .place_building(12, 12, "residential")
        .unwrap_err();
    assert_eq!(err.kind(), PlacementErrorKind::FootprintBlocked);
    city.assert_funds(500);
    assert_eq!(city.building_count(), 1);
}

#[test]
fn test_costs_are_conserved_across_placements() {
    let mut city = TestCity::with_config(CityConfig::default().with_starting_funds(5_000));
    let keys = ["road", "road", "power-line", "commercial", "power-plant"];
    let positions = [(0, 0), (1, 0), (2, 0), (4, 4), (8, 8)];

    let mut spent = 0;
    for (key, (x, y)) in keys.iter().zip(positions) {
        city.city_mut().place_building(x, y, key).expect("placed");
        spent += city.city().catalog().get(key).map(|d| d.cost).unwrap_or(0);
    }
    assert_eq!(spent, 25 + 25 + 10 + 400 + 750);
    city.assert_funds(5_000 - spent);
}

#[test]
fn test_unaffordable_placement_never_touches_funds() {
    let mut city = TestCity::with_config(CityConfig::default().with_starting_funds(700));
    city.city_mut()
        .place_building(0, 0, "residential")
        .expect("placed");
    city.assert_funds(200);

    for key in ["residential", "commercial", "industrial", "power-plant"] {
        let err = city.city_mut().place_building(6, 6, key).unwrap_err();
        assert_eq!(err.kind(), PlacementErrorKind::InsufficientFunds);
        city.assert_funds(200);
    }
    city.assert_empty(6, 6);

    // Cheap things still fit.
    city.city_mut().place_building(6, 6, "road").expect("placed");
    city.assert_funds(175);
}

#[test]
fn test_unknown_type_is_checked_before_funds() {
    let mut city = TestCity::with_config(CityConfig::default().with_starting_funds(0));
    let err = city
        .city_mut()
        .place_building(0, 0, "stadium")
        .unwrap_err();
    assert_eq!(err, PlacementError::UnknownType("stadium".to_string()));
}

#[test]
fn test_funds_are_checked_before_footprint() {
    let mut city = TestCity::with_config(CityConfig::default().with_starting_funds(100));
    city.city_mut().place_building(3, 3, "road").expect("placed");
    let err = city
        .city_mut()
        .place_building(3, 3, "power-plant")
        .unwrap_err();
    assert_eq!(err.kind(), PlacementErrorKind::InsufficientFunds);
}

#[test]
fn test_blocked_footprint_leaves_grid_untouched() {
    let mut city = TestCity::with_config(CityConfig::default().with_starting_funds(10_000))
        .with_building(9, 10, "road");

    let before: Vec<_> = city
        .city()
        .grid()
        .iter()
        .map(|t| t.origin())
        .collect();
    let funds = city.funds();

    // Every 2x2 anchor whose footprint includes (9,10) but not as the origin.
    for (x, y) in [(8, 9), (9, 9), (8, 10)] {
        let err = city
            .city_mut()
            .place_building(x, y, "industrial")
            .unwrap_err();
        assert_eq!(err, PlacementError::FootprintBlocked { x: 9, y: 10 });
    }

    let after: Vec<_> = city
        .city()
        .grid()
        .iter()
        .map(|t| t.origin())
        .collect();
    assert_eq!(before, after);
    city.assert_funds(funds);
}

#[test]
fn test_adjacent_footprints_do_not_overlap() {
    let city = TestCity::with_config(CityConfig::default().with_starting_funds(10_000))
        .with_building(0, 0, "residential")
        .with_building(2, 0, "commercial")
        .with_building(0, 2, "industrial");

    assert_eq!(city.building_count(), 3);
    assert_eq!(city.occupied_tile_count(), 12);
    for tile in city.city().grid().iter() {
        if let Some(origin) = tile.origin() {
            let owner = city
                .city()
                .building_at(origin.x, origin.y)
                .expect("origin holds a building");
            assert!(owner.footprint_cells().contains(&GridPos::new(tile.x, tile.y)));
        }
    }
}
