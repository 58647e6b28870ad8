//! Read-only registry of building types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::types::{BuildingCategory, BuildingTypeDefinition, Footprint};

/// Errors raised while loading a catalog from data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The JSON document could not be parsed.
    Parse(String),
    /// Two definitions share the same key.
    DuplicateKey(String),
    /// A definition declares a footprint smaller than 1x1.
    EmptyFootprint(String),
    /// A definition declares a footprint whose tile count overflows.
    OversizedFootprint(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "Catalog parse error: {msg}"),
            CatalogError::DuplicateKey(key) => write!(f, "Duplicate building type '{key}'"),
            CatalogError::EmptyFootprint(key) => {
                write!(f, "Building type '{key}' has an empty footprint")
            }
            CatalogError::OversizedFootprint(key) => {
                write!(f, "Building type '{key}' has an oversized footprint")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildingCatalog {
    definitions: BTreeMap<String, Arc<BuildingTypeDefinition>>,
}

impl BuildingCatalog {
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = BuildingTypeDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for def in definitions {
            if def.footprint.width == 0 || def.footprint.height == 0 {
                return Err(CatalogError::EmptyFootprint(def.key));
            }
            if def.footprint.checked_area().is_none() {
                return Err(CatalogError::OversizedFootprint(def.key));
            }
            if map.contains_key(&def.key) {
                return Err(CatalogError::DuplicateKey(def.key));
            }
            map.insert(def.key.clone(), Arc::new(def));
        }
        Ok(Self { definitions: map })
    }

    /// Load a catalog from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<BuildingTypeDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// The built-in set of building types.
    pub fn standard() -> Self {
        let defs = [
            standard_def("residential", "House", BuildingCategory::Residential, 500, 2)
                .residents(16)
                .demand(4),
            standard_def("commercial", "Shop", BuildingCategory::Commercial, 400, 2).demand(6),
            standard_def("industrial", "Factory", BuildingCategory::Industrial, 600, 2).demand(10),
            standard_def("road", "Road", BuildingCategory::Road, 25, 1),
            standard_def("power-plant", "Power Plant", BuildingCategory::PowerPlant, 750, 2)
                .supply(40),
            standard_def("power-line", "Power Line", BuildingCategory::PowerLine, 10, 1),
        ];
        let definitions = defs
            .into_iter()
            .map(|d| (d.key.clone(), Arc::new(d)))
            .collect();
        Self { definitions }
    }

    pub fn get(&self, key: &str) -> Option<&Arc<BuildingTypeDefinition>> {
        self.definitions.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BuildingTypeDefinition>> {
        self.definitions.values()
    }
}

fn standard_def(
    key: &str,
    name: &str,
    category: BuildingCategory,
    cost: u64,
    side: usize,
) -> BuildingTypeDefinition {
    BuildingTypeDefinition {
        key: key.to_string(),
        name: name.to_string(),
        category,
        cost,
        footprint: Footprint::new(side, side),
        residents_capacity: 0,
        power_supply: 0,
        power_demand: 0,
        variants: 3,
    }
}

impl BuildingTypeDefinition {
    fn residents(mut self, capacity: u32) -> Self {
        self.residents_capacity = capacity;
        self
    }

    fn supply(mut self, units: u32) -> Self {
        self.power_supply = units;
        self
    }

    fn demand(mut self, units: u32) -> Self {
        self.power_demand = units;
        self
    }
}
