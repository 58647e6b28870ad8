//! Bounded breadth-first search over the tile grid.
//!
//! Tiles are evaluated in non-decreasing hop distance from the start, so the
//! first match is a closest one. Each tile is evaluated at most once.

use std::collections::VecDeque;

use crate::city::City;
use crate::grid::{GridPos, Tile};

impl City {
    /// First tile within `max_distance` hops of `start` for which `predicate`
    /// holds, or `None`. An out-of-range `start` finds nothing.
    pub fn find_tile<F>(&self, start: GridPos, predicate: F, max_distance: usize) -> Option<&Tile>
    where
        F: FnMut(&Tile) -> bool,
    {
        self.find_tile_through(start, predicate, |_| true, max_distance)
    }

    /// Like [`City::find_tile`], but the search only spreads onward from the
    /// start tile and from tiles for which `passable` holds. Impassable tiles
    /// are still offered to `predicate`.
    pub fn find_tile_through<F, P>(
        &self,
        start: GridPos,
        mut predicate: F,
        mut passable: P,
        max_distance: usize,
    ) -> Option<&Tile>
    where
        F: FnMut(&Tile) -> bool,
        P: FnMut(&Tile) -> bool,
    {
        let grid = self.grid();
        let start_tile = grid.get(start.x, start.y)?;

        let mut visited = vec![false; grid.len()];
        let mut queue = VecDeque::new();
        queue.push_back((start_tile, 0usize));

        while let Some((tile, dist)) = queue.pop_front() {
            let idx = tile.id().0;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;

            if dist > max_distance {
                continue;
            }

            if predicate(tile) {
                return Some(tile);
            }

            if dist > 0 && !passable(tile) {
                continue;
            }

            let (neighbors, count) = grid.neighbors4(tile.x, tile.y);
            for pos in &neighbors[..count] {
                if let Some(next) = grid.get(pos.x, pos.y) {
                    if !visited[next.id().0] {
                        queue.push_back((next, dist + 1));
                    }
                }
            }
        }

        None
    }
}
