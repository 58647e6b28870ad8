mod catalog;
mod factory;
mod logic;
pub mod types;

pub use catalog::{BuildingCatalog, CatalogError};
pub use factory::BuildingFactory;
pub use types::{
    Building, BuildingCategory, BuildingId, BuildingTypeDefinition, Footprint, Residents,
};
