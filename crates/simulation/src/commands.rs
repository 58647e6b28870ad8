//! Deferred world mutations recorded by per-tile building logic.
//!
//! A building steps against a shared view of the city and queues its effects
//! here. The city applies the queue as soon as that tile has finished
//! stepping, so later tiles in the same tick observe the changes.

use crate::grid::GridPos;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityCommand {
    SetResidents { origin: GridPos, count: u32 },
    SetPowered { origin: GridPos, powered: bool },
    PlaceBuilding { x: usize, y: usize, key: String },
    Bulldoze { x: usize, y: usize },
}

#[derive(Debug, Default)]
pub struct CityCommands {
    queue: Vec<CityCommand>,
}

impl CityCommands {
    pub fn push(&mut self, command: CityCommand) {
        self.queue.push(command);
    }

    pub fn set_residents(&mut self, origin: GridPos, count: u32) {
        self.push(CityCommand::SetResidents { origin, count });
    }

    pub fn set_powered(&mut self, origin: GridPos, powered: bool) {
        self.push(CityCommand::SetPowered { origin, powered });
    }

    pub fn place_building(&mut self, x: usize, y: usize, key: impl Into<String>) {
        self.push(CityCommand::PlaceBuilding {
            x,
            y,
            key: key.into(),
        });
    }

    pub fn bulldoze(&mut self, x: usize, y: usize) {
        self.push(CityCommand::Bulldoze { x, y });
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every queued command in insertion order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, CityCommand> {
        self.queue.drain(..)
    }
}
