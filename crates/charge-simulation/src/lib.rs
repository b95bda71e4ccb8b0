//! # Charge Simulation Engine
//!
//! Owns the charge collection, runs the all-pairs Coulomb force pass, and
//! integrates moving charges on a fixed timestep decoupled from frame rate.

pub mod params;
pub mod simulation;
pub mod timestep;

pub use params::*;
pub use simulation::*;
pub use timestep::*;
