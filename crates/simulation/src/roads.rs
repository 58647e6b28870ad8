//! Road connectivity handed to the vehicle layer.
//!
//! The city only tells the graph when a road tile appears or disappears;
//! what vehicles do with it lives on the other side of
//! [`VehicleGraphAdapter`]. [`RoadGraph`] is the default implementation.

use std::any::Any;
use std::collections::{HashMap, HashSet};

use pathfinding::prelude::astar;
use serde::{Deserialize, Serialize};

use crate::buildings::Building;

/// Receives road-tile changes from the city.
///
/// Called with `Some(building)` when a road is placed at `(x, y)` and with
/// `None` when it is removed. Repeating the same update must be harmless.
pub trait VehicleGraphAdapter: Send + Sync + 'static {
    fn update_tile(&mut self, x: usize, y: usize, building: Option<&Building>);

    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoadNode(pub usize, pub usize);

impl RoadNode {
    fn orthogonal(self) -> impl Iterator<Item = RoadNode> {
        let RoadNode(x, y) = self;
        [
            x.checked_sub(1).map(|nx| RoadNode(nx, y)),
            x.checked_add(1).map(|nx| RoadNode(nx, y)),
            y.checked_sub(1).map(|ny| RoadNode(x, ny)),
            y.checked_add(1).map(|ny| RoadNode(x, ny)),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RoadGraph {
    edges: HashMap<RoadNode, HashSet<RoadNode>>,
    intersections: HashSet<RoadNode>,
}

impl RoadGraph {
    /// Add a road node and connect it to adjacent road nodes.
    /// Returns `false` if the node already existed.
    pub fn add_road(&mut self, x: usize, y: usize) -> bool {
        let node = RoadNode(x, y);
        if self.edges.contains_key(&node) {
            return false;
        }
        self.edges.entry(node).or_default();

        let neighbors: Vec<RoadNode> = node
            .orthogonal()
            .filter(|n| self.edges.contains_key(n))
            .collect();
        for neighbor in &neighbors {
            self.edges.entry(node).or_default().insert(*neighbor);
            self.edges.entry(*neighbor).or_default().insert(node);
        }

        self.update_intersection(node);
        for neighbor in neighbors {
            self.update_intersection(neighbor);
        }
        true
    }

    /// Returns `false` if there was no road node at `(x, y)`.
    pub fn remove_road(&mut self, x: usize, y: usize) -> bool {
        let node = RoadNode(x, y);
        let Some(neighbors) = self.edges.remove(&node) else {
            return false;
        };
        for neighbor in &neighbors {
            if let Some(nset) = self.edges.get_mut(neighbor) {
                nset.remove(&node);
            }
            self.update_intersection(*neighbor);
        }
        self.intersections.remove(&node);
        true
    }

    fn update_intersection(&mut self, node: RoadNode) {
        let edge_count = self.edges.get(&node).map_or(0, |e| e.len());
        if edge_count >= 3 {
            self.intersections.insert(node);
        } else {
            self.intersections.remove(&node);
        }
    }

    pub fn is_road(&self, x: usize, y: usize) -> bool {
        self.edges.contains_key(&RoadNode(x, y))
    }

    pub fn is_intersection(&self, x: usize, y: usize) -> bool {
        self.intersections.contains(&RoadNode(x, y))
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn neighbors(&self, node: &RoadNode) -> Vec<RoadNode> {
        self.edges
            .get(node)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Shortest road path between two road nodes, endpoints included.
    pub fn find_route(&self, start: RoadNode, goal: RoadNode) -> Option<Vec<RoadNode>> {
        if !self.edges.contains_key(&start) || !self.edges.contains_key(&goal) {
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }
        astar(
            &start,
            |node| self.neighbors(node).into_iter().map(|n| (n, 1u32)),
            |node| heuristic(node, &goal),
            |node| *node == goal,
        )
        .map(|(path, _cost)| path)
    }
}

fn heuristic(a: &RoadNode, b: &RoadNode) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

impl VehicleGraphAdapter for RoadGraph {
    fn update_tile(&mut self, x: usize, y: usize, building: Option<&Building>) {
        match building {
            Some(b) if b.category().is_road() => {
                self.add_road(x, y);
            }
            _ => {
                self.remove_road(x, y);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
