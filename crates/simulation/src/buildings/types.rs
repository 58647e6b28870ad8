use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingCategory {
    Residential,
    Commercial,
    Industrial,
    Road,
    PowerPlant,
    PowerLine,
}

impl BuildingCategory {
    pub const ALL: [BuildingCategory; 6] = [
        BuildingCategory::Residential,
        BuildingCategory::Commercial,
        BuildingCategory::Industrial,
        BuildingCategory::Road,
        BuildingCategory::PowerPlant,
        BuildingCategory::PowerLine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildingCategory::Residential => "residential",
            BuildingCategory::Commercial => "commercial",
            BuildingCategory::Industrial => "industrial",
            BuildingCategory::Road => "road",
            BuildingCategory::PowerPlant => "power-plant",
            BuildingCategory::PowerLine => "power-line",
        }
    }

    pub fn is_road(self) -> bool {
        self == BuildingCategory::Road
    }

    pub fn is_zone(self) -> bool {
        matches!(
            self,
            BuildingCategory::Residential | BuildingCategory::Commercial | BuildingCategory::Industrial
        )
    }

    /// Whether electricity passes through tiles occupied by this category.
    pub fn conducts_power(self) -> bool {
        !self.is_road()
    }
}

impl fmt::Display for BuildingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: usize,
    pub height: usize,
}

impl Footprint {
    pub const SINGLE: Footprint = Footprint::new(1, 1);

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of tiles covered, saturating at `usize::MAX`.
    pub fn area(self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of tiles covered, or `None` if that does not fit in a `usize`.
    pub fn checked_area(self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Static description of a building type, looked up by `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingTypeDefinition {
    pub key: String,
    pub name: String,
    pub category: BuildingCategory,
    pub cost: u64,
    #[serde(default)]
    pub footprint: Footprint,
    /// Maximum residents; only meaningful for residential buildings.
    #[serde(default)]
    pub residents_capacity: u32,
    /// Power units produced per tick.
    #[serde(default)]
    pub power_supply: u32,
    /// Power units required per tick to count as powered.
    #[serde(default)]
    pub power_demand: u32,
    /// Number of interchangeable visual variants.
    #[serde(default = "default_variants")]
    pub variants: u8,
}

fn default_variants() -> u8 {
    1
}

impl BuildingTypeDefinition {
    pub fn is_power_consumer(&self) -> bool {
        self.power_demand > 0
    }

    pub fn is_power_source(&self) -> bool {
        self.category == BuildingCategory::PowerPlant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residents {
    pub count: u32,
    pub capacity: u32,
}

/// A placed building. Owned by the origin tile of its footprint.
#[derive(Debug, Clone)]
pub struct Building {
    pub id: BuildingId,
    pub definition: Arc<BuildingTypeDefinition>,
    pub origin: GridPos,
    /// Opaque to the simulation; picked once for the view layer.
    pub variant: u8,
    pub residents: Option<Residents>,
    pub powered: bool,
}

impl Building {
    pub fn category(&self) -> BuildingCategory {
        self.definition.category
    }

    pub fn key(&self) -> &str {
        &self.definition.key
    }

    pub fn resident_count(&self) -> u32 {
        self.residents.map_or(0, |r| r.count)
    }

    /// Every tile this building covers, origin first.
    pub fn footprint_cells(&self) -> Vec<GridPos> {
        let Footprint { width, height } = self.definition.footprint;
        let mut cells = Vec::with_capacity(width * height);
        for dx in 0..width {
            for dy in 0..height {
                cells.push(GridPos::new(self.origin.x + dx, self.origin.y + dy));
            }
        }
        cells
    }
}
