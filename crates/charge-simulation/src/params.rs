//! Simulation parameters for runtime tuning

use charge_physics::constants::{
    DEFAULT_CHARGE_MASS, DEFAULT_MAX_CHARGES, DEFAULT_TIMESTEP, K_COULOMB,
};

/// Runtime-tunable knobs of the engine.
///
/// Injected at construction rather than read from globals so tests can vary
/// every value independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    /// Coulomb's constant, N·m²/C²
    pub coulomb_constant: f64,
    /// Mass assigned to charges created through the engine's convenience
    /// constructor, kg
    pub default_mass: f64,
    /// Fixed physics timestep, simulated seconds per update
    pub timestep: f64,
    /// Hard cap on the charge collection; adds beyond it are dropped
    pub max_charges: usize,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            coulomb_constant: K_COULOMB,
            default_mass: DEFAULT_CHARGE_MASS,
            timestep: DEFAULT_TIMESTEP,
            max_charges: DEFAULT_MAX_CHARGES,
        }
    }
}
