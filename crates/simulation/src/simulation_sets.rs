//! Ordering of city systems within the `FixedUpdate` schedule.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Host-side setup that must land before the tick (queued
//!   placements from input, config changes).
//! * **Simulation** – `step_city`: one `City::simulate(1)` per fixed tick.
//! * **PostSim** – Read-only aggregation (`CityStats`) for UI consumers.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
