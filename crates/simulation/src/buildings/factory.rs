use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::types::{Building, BuildingCategory, BuildingId, BuildingTypeDefinition, Residents};
use crate::grid::GridPos;

/// Builds [`Building`] instances from catalog entries.
///
/// Apart from the id, the output depends only on the inputs and the seed:
/// the same definition at the same coordinates always gets the same variant.
#[derive(Debug, Clone)]
pub struct BuildingFactory {
    next_id: u64,
    variant_seed: u64,
}

impl BuildingFactory {
    pub fn new(variant_seed: u64) -> Self {
        Self {
            next_id: 1,
            variant_seed,
        }
    }

    pub fn create(&mut self, x: usize, y: usize, definition: &Arc<BuildingTypeDefinition>) -> Building {
        let id = BuildingId(self.next_id);
        self.next_id += 1;

        let residents = (definition.category == BuildingCategory::Residential).then_some(Residents {
            count: 0,
            capacity: definition.residents_capacity,
        });

        Building {
            id,
            definition: Arc::clone(definition),
            origin: GridPos::new(x, y),
            variant: self.pick_variant(x, y, definition),
            residents,
            // Plants power themselves; consumers wait for the power service.
            powered: definition.is_power_source(),
        }
    }

    fn pick_variant(&self, x: usize, y: usize, definition: &BuildingTypeDefinition) -> u8 {
        if definition.variants <= 1 {
            return 0;
        }
        let key_hash = definition
            .key
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
                (h ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
            });
        let seed = self.variant_seed
            ^ key_hash
            ^ (x as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ (y as u64).wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.gen_range(0..definition.variants)
    }
}

impl Default for BuildingFactory {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_VARIANT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::BuildingCatalog;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let catalog = BuildingCatalog::standard();
        let road = catalog.get("road").expect("road exists");
        let mut factory = BuildingFactory::default();
        let a = factory.create(0, 0, road);
        let b = factory.create(0, 0, road);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_variant_is_deterministic() {
        let catalog = BuildingCatalog::standard();
        let house = catalog.get("residential").expect("residential exists");
        let mut f1 = BuildingFactory::new(7);
        let mut f2 = BuildingFactory::new(7);
        for (x, y) in [(0, 0), (3, 9), (12, 12)] {
            let a = f1.create(x, y, house);
            let b = f2.create(x, y, house);
            assert_eq!(a.variant, b.variant);
            assert!(a.variant < house.variants);
        }
    }

    #[test]
    fn test_residential_gets_empty_residents() {
        let catalog = BuildingCatalog::standard();
        let mut factory = BuildingFactory::default();

        let house = factory.create(2, 3, catalog.get("residential").expect("exists"));
        assert_eq!(house.origin, GridPos::new(2, 3));
        assert_eq!(
            house.residents,
            Some(Residents {
                count: 0,
                capacity: 16
            })
        );
        assert!(!house.powered);

        let plant = factory.create(0, 0, catalog.get("power-plant").expect("exists"));
        assert!(plant.residents.is_none());
        assert!(plant.powered);
    }
}
