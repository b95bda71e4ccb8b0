//! # Charge Physics
//!
//! Core electrostatics for the charge sandbox: the charge model, polar force
//! algebra, and Coulomb's-law force computation between point charges.

pub mod charge;
pub mod constants;
pub mod force;
pub mod forces;

pub use charge::*;
pub use constants::*;
pub use force::*;
pub use forces::*;
