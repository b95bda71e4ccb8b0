//! Point charges, stationary or moving

use glam::DVec2;

use crate::constants::DEFAULT_CHARGE_MASS;
use crate::force::Force;

/// Whether a charge is pinned in place or free to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeKind {
    Stationary,
    Moving,
}

/// Motion state of a charge.
///
/// Stationary charges carry no kinematic state at all; only moving charges
/// have a velocity and an acceleration accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Stationary,
    Moving {
        /// m/s
        velocity: DVec2,
        /// m/s², accumulated over a single tick and cleared before the next
        acceleration: DVec2,
    },
}

/// A point charge in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    /// Position in a y-up plane
    pub position: DVec2,
    /// Charge in Coulombs, signed
    pub q: f64,
    /// Mass in kg, always positive
    pub mass: f64,
    pub motion: Motion,
}

impl Charge {
    /// Create a charge of the given kind with the default mass
    pub fn new(x: f64, y: f64, q: f64, kind: ChargeKind) -> Self {
        let motion = match kind {
            ChargeKind::Stationary => Motion::Stationary,
            ChargeKind::Moving => Motion::Moving {
                velocity: DVec2::ZERO,
                acceleration: DVec2::ZERO,
            },
        };

        Self {
            position: DVec2::new(x, y),
            q,
            mass: DEFAULT_CHARGE_MASS,
            motion,
        }
    }

    /// Create a charge that never moves
    pub fn stationary(x: f64, y: f64, q: f64) -> Self {
        Self::new(x, y, q, ChargeKind::Stationary)
    }

    /// Create a charge subject to force-driven motion
    pub fn moving(x: f64, y: f64, q: f64) -> Self {
        Self::new(x, y, q, ChargeKind::Moving)
    }

    /// Override the default mass. Non-positive masses are rejected and the
    /// existing mass is kept.
    pub fn with_mass(mut self, mass: f64) -> Self {
        if mass > 0.0 {
            self.mass = mass;
        } else {
            log::warn!("ignoring non-positive mass {mass}; keeping {}", self.mass);
        }
        self
    }

    pub fn kind(&self) -> ChargeKind {
        match self.motion {
            Motion::Stationary => ChargeKind::Stationary,
            Motion::Moving { .. } => ChargeKind::Moving,
        }
    }

    /// Euclidean distance to a point
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position.distance(point)
    }

    /// Add a force's contribution to the acceleration accumulator.
    /// No-op for stationary charges.
    pub fn apply_force(&mut self, force: Force) {
        if let Motion::Moving { acceleration, .. } = &mut self.motion {
            *acceleration += force.components() / self.mass;
        }
    }

    /// Zero the acceleration accumulator. Must run at the start of every
    /// tick, otherwise accelerations compound across ticks.
    pub fn clear_acceleration(&mut self) {
        if let Motion::Moving { acceleration, .. } = &mut self.motion {
            *acceleration = DVec2::ZERO;
        }
    }

    /// One semi-implicit Euler step: velocity from acceleration first, then
    /// position from the new velocity. No-op for stationary charges.
    pub fn integrate(&mut self, dt: f64) {
        if let Motion::Moving {
            velocity,
            acceleration,
        } = &mut self.motion
        {
            *velocity += *acceleration * dt;
            self.position += *velocity * dt;
        }
    }

    /// Current velocity; zero for stationary charges
    pub fn velocity(&self) -> DVec2 {
        match self.motion {
            Motion::Stationary => DVec2::ZERO,
            Motion::Moving { velocity, .. } => velocity,
        }
    }

    /// Current acceleration accumulator; zero for stationary charges
    pub fn acceleration(&self) -> DVec2 {
        match self.motion {
            Motion::Stationary => DVec2::ZERO,
            Motion::Moving { acceleration, .. } => acceleration,
        }
    }
}
