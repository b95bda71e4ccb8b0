//! Coulomb's-law force computation between point charges
//!
//! Everything here works in a y-up mathematical plane. A screen-space front
//! end (where y grows downward) negates y when converting positions in and
//! angles out; the physics never sees screen coordinates.

use glam::DVec2;
use std::fmt;

use crate::charge::Charge;
use crate::force::Force;

/// Failure modes of the pure force law
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceError {
    /// Both charges sit at exactly the same position; the force is undefined
    CoincidentCharges,
}

impl fmt::Display for ForceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoincidentCharges => {
                write!(f, "charges are coincident, electric force is undefined")
            }
        }
    }
}

impl std::error::Error for ForceError {}

/// Euclidean distance between two points
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Four-quadrant angle of the ray `from -> to`, radians counter-clockwise
/// from the positive x axis
pub fn angle(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// The electric force `source` exerts on `test`, per Coulomb's law:
/// magnitude `k·|q_s|·|q_t| / r²`, directed away from `source` for like
/// signs and toward it for opposite signs.
///
/// Coincident charges make the force undefined; the caller decides whether
/// to skip the pair or surface the error. NaN and infinity never escape.
pub fn electric_force(source: &Charge, test: &Charge, k: f64) -> Result<Force, ForceError> {
    let separation = test.position - source.position;
    let r = separation.length();
    if r == 0.0 {
        return Err(ForceError::CoincidentCharges);
    }

    let magnitude = k * source.q.abs() * test.q.abs() / (r * r);

    // Like signs repel: push the test charge along source -> test.
    // Opposite signs attract: pull it back the other way.
    let direction = if source.q * test.q >= 0.0 {
        separation
    } else {
        -separation
    };

    Ok(Force::new(magnitude, direction.y.atan2(direction.x)))
}
