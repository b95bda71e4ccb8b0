//! Polar force representation and composition

use glam::DVec2;
use std::fmt;
use std::ops::Add;

/// A 2D force stored as magnitude and direction.
///
/// `magnitude` is always non-negative. Composition goes through Cartesian
/// components and back via a four-quadrant `atan2`, so the angle is correct
/// in every quadrant. A zero-magnitude force keeps angle 0.0, which is what
/// `atan2(0.0, 0.0)` returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    /// Newtons
    pub magnitude: f64,
    /// Radians, counter-clockwise from the positive x axis
    pub angle: f64,
}

impl Force {
    /// The additive identity
    pub const ZERO: Self = Self {
        magnitude: 0.0,
        angle: 0.0,
    };

    pub fn new(magnitude: f64, angle: f64) -> Self {
        Self { magnitude, angle }
    }

    /// Build a force from Cartesian components
    pub fn from_components(components: DVec2) -> Self {
        Self {
            magnitude: components.length(),
            angle: components.y.atan2(components.x),
        }
    }

    /// Decompose into Cartesian components
    pub fn components(&self) -> DVec2 {
        DVec2::new(
            self.magnitude * self.angle.cos(),
            self.magnitude * self.angle.sin(),
        )
    }

    /// Sum a collection of forces, starting from [`Force::ZERO`]
    pub fn net(forces: impl IntoIterator<Item = Force>) -> Self {
        forces.into_iter().fold(Self::ZERO, Add::add)
    }
}

impl Add for Force {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_components(self.components() + other.components())
    }
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Force(magnitude: {}, angle (degrees): {})",
            self.magnitude,
            self.angle.to_degrees()
        )
    }
}
