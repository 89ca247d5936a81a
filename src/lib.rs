//! Accretion - Celestial Merge Simulator
//!
//! A library crate providing the body registry, proximity tracking, gravity,
//! collision and merge logic of a real-time celestial simulation, plus a Bevy
//! plugin driving it on the fixed schedule.

pub mod collision;
pub mod config;
pub mod follow;
pub mod merge;
pub mod physics;
pub mod plugin;
pub mod proximity;
pub mod registry;
pub mod scenarios;
pub mod simulation;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::SimulationConfig;
pub use plugin::SimulationPlugin;
pub use simulation::{Simulation, SimulationError};
