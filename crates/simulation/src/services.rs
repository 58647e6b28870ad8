//! Simulation services: self-contained units stepped once per tick, in
//! registration order, before any tile logic runs.

mod power;

use std::any::Any;

use crate::city::City;

pub use power::{PowerReport, PowerService};

/// A unit of per-tick city logic (power distribution and the like).
///
/// `step` must not fail the tick: recoverable problems are logged and the
/// remaining services still run.
pub trait SimulationService: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn step(&mut self, city: &mut City);

    fn as_any(&self) -> &dyn Any;
}
