//! Physical constants for the charge simulation
//!
//! These are the defaults the simulation parameters start from; nothing in
//! the engine reads them directly, so tests can vary every value.

/// Coulomb's constant k = 1/(4πε₀), in N·m²/C²
pub const K_COULOMB: f64 = 8.99e9;

/// Default mass of a charge, in kg
pub const DEFAULT_CHARGE_MASS: f64 = 1e-6;

/// Default fixed physics timestep, in simulated seconds
pub const DEFAULT_TIMESTEP: f64 = 0.01;

/// Default cap on the number of charges a simulation will hold
pub const DEFAULT_MAX_CHARGES: usize = 100;
