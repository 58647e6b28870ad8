use serde::{Deserialize, Serialize};

use crate::buildings::Building;

/// Integer grid coordinate, `[x][y]` addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, which equals hop distance under 4-neighbour adjacency.
    pub fn manhattan(self, other: GridPos) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Stable tile identity, derived from the tile's coordinates at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub usize);

/// What sits on a tile.
///
/// The footprint's origin tile owns the [`Building`]; every other tile of the
/// footprint only points back at the origin.
#[derive(Debug, Clone)]
pub enum Occupancy {
    Origin(Building),
    Covered { origin: GridPos },
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    id: TileId,
    occupancy: Option<Occupancy>,
}

impl Tile {
    fn new(x: usize, y: usize, size: usize) -> Self {
        Self {
            x,
            y,
            id: TileId(x * size + y),
            occupancy: None,
        }
    }

    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupancy.is_some()
    }

    pub fn occupancy(&self) -> Option<&Occupancy> {
        self.occupancy.as_ref()
    }

    /// The building owned by this tile. `None` for empty tiles and for
    /// non-origin tiles of a footprint; use `CityGrid::building_at` to resolve those.
    pub fn building(&self) -> Option<&Building> {
        match &self.occupancy {
            Some(Occupancy::Origin(building)) => Some(building),
            _ => None,
        }
    }

    pub(crate) fn building_mut(&mut self) -> Option<&mut Building> {
        match &mut self.occupancy {
            Some(Occupancy::Origin(building)) => Some(building),
            _ => None,
        }
    }

    /// Origin of the footprint covering this tile, if any.
    pub fn origin(&self) -> Option<GridPos> {
        match &self.occupancy {
            Some(Occupancy::Origin(_)) => Some(self.pos()),
            Some(Occupancy::Covered { origin }) => Some(*origin),
            None => None,
        }
    }

    pub fn distance_to(&self, other: &Tile) -> usize {
        self.pos().manhattan(other.pos())
    }

    pub(crate) fn set_occupancy(&mut self, occupancy: Occupancy) {
        self.occupancy = Some(occupancy);
    }

    pub(crate) fn clear(&mut self) -> Option<Occupancy> {
        self.occupancy.take()
    }
}

/// `size x size` tiles, allocated once and never reshaped.
#[derive(Debug, Clone)]
pub struct CityGrid {
    tiles: Vec<Tile>,
    size: usize,
}

impl CityGrid {
    pub fn new(size: usize) -> Self {
        let mut tiles = Vec::with_capacity(size * size);
        for x in 0..size {
            for y in 0..size {
                tiles.push(Tile::new(x, y, size));
            }
        }
        Self { tiles, size }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            self.tiles.get(self.index(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.tiles.get_mut(idx)
        } else {
            None
        }
    }

    /// Returns up to 4 orthogonal neighbours and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbours.
    pub fn neighbors4(&self, x: usize, y: usize) -> ([GridPos; 4], usize) {
        let mut result = [GridPos::new(0, 0); 4];
        let mut count = 0;
        if !self.in_bounds(x, y) {
            return (result, count);
        }
        if x > 0 {
            result[count] = GridPos::new(x - 1, y);
            count += 1;
        }
        if x + 1 < self.size {
            result[count] = GridPos::new(x + 1, y);
            count += 1;
        }
        if y > 0 {
            result[count] = GridPos::new(x, y - 1);
            count += 1;
        }
        if y + 1 < self.size {
            result[count] = GridPos::new(x, y + 1);
            count += 1;
        }
        (result, count)
    }

    /// The building covering `(x, y)`, resolving non-origin footprint tiles
    /// to the building their origin owns.
    pub fn building_at(&self, x: usize, y: usize) -> Option<&Building> {
        let origin = self.get(x, y)?.origin()?;
        self.get(origin.x, origin.y)?.building()
    }

    pub fn building_on(&self, tile: &Tile) -> Option<&Building> {
        self.building_at(tile.x, tile.y)
    }

    /// All tiles, x outer and y inner.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Coordinates of a `width x height` rectangle anchored at `(x, y)`, or
    /// `None` if any part of it leaves the grid.
    pub fn rect(&self, x: usize, y: usize, width: usize, height: usize) -> Option<Vec<GridPos>> {
        let x_end = x.checked_add(width)?;
        let y_end = y.checked_add(height)?;
        if x_end > self.size || y_end > self.size {
            return None;
        }
        let mut cells = Vec::with_capacity(width * height);
        for cx in x..x_end {
            for cy in y..y_end {
                cells.push(GridPos::new(cx, cy));
            }
        }
        Some(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::{BuildingCatalog, BuildingFactory};

    #[test]
    fn test_ids_are_row_major_and_stable() {
        let grid = CityGrid::new(4);
        let ids: Vec<usize> = grid.iter().map(|t| t.id().0).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
        assert_eq!(grid.get(1, 0).map(|t| t.id()), Some(TileId(4)));
        assert_eq!(grid.get(0, 1).map(|t| t.id()), Some(TileId(1)));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = CityGrid::new(16);
        assert!(grid.get(16, 0).is_none());
        assert!(grid.get(0, 16).is_none());
        assert!(grid.get(usize::MAX, usize::MAX).is_none());
        assert!(grid.get(15, 15).is_some());
    }

    #[test]
    fn test_neighbors() {
        let grid = CityGrid::new(16);
        assert_eq!(grid.neighbors4(0, 0).1, 2);
        assert_eq!(grid.neighbors4(0, 7).1, 3);
        assert_eq!(grid.neighbors4(8, 8).1, 4);
        assert_eq!(grid.neighbors4(15, 15).1, 2);
        assert_eq!(grid.neighbors4(16, 3).1, 0);
    }

    #[test]
    fn test_rect_rejects_overhang() {
        let grid = CityGrid::new(16);
        assert_eq!(grid.rect(14, 14, 2, 2).map(|c| c.len()), Some(4));
        assert!(grid.rect(15, 14, 2, 2).is_none());
        assert!(grid.rect(usize::MAX, 0, 2, 1).is_none());
    }

    #[test]
    fn test_building_at_resolves_covered_tiles() {
        let catalog = BuildingCatalog::standard();
        let mut factory = BuildingFactory::default();
        let plant = factory.create(2, 2, catalog.get("power-plant").expect("exists"));
        let id = plant.id;

        let mut grid = CityGrid::new(8);
        for cell in plant.footprint_cells().into_iter().skip(1) {
            if let Some(tile) = grid.get_mut(cell.x, cell.y) {
                tile.set_occupancy(Occupancy::Covered {
                    origin: GridPos::new(2, 2),
                });
            }
        }
        if let Some(tile) = grid.get_mut(2, 2) {
            tile.set_occupancy(Occupancy::Origin(plant));
        }

        let covered = grid.get(3, 3).expect("in bounds");
        assert!(covered.building().is_none());
        assert_eq!(grid.building_on(covered).map(|b| b.id), Some(id));
        for (x, y) in [(2, 2), (3, 2), (2, 3)] {
            assert_eq!(grid.building_at(x, y).map(|b| b.id), Some(id));
        }
        assert!(grid.building_at(4, 4).is_none());
        assert!(grid.building_at(9, 9).is_none());
    }

    #[test]
    fn test_distance_is_manhattan() {
        let grid = CityGrid::new(8);
        let a = grid.get(1, 1).expect("in bounds");
        let b = grid.get(4, 6).expect("in bounds");
        assert_eq!(a.distance_to(b), 8);
        assert_eq!(b.distance_to(a), 8);
    }
}
