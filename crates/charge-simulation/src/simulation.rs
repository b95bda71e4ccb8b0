//! The charge simulation engine
//!
//! A single `ChargeSim` owns every charge. The moving subset is tracked as a
//! list of indices into the main collection; every mutating operation keeps
//! the two in sync, which is the one correctness-critical invariant here.

use glam::DVec2;
use std::fmt;

use charge_physics::{electric_force, Charge, ChargeKind, Force};

use crate::params::SimParams;

/// Recoverable failures of the engine's mutating operations.
///
/// None of these corrupt the charge collections; the operation is simply
/// refused and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// The collection is at `max_charges`; the new charge was dropped
    CapacityReached { max: usize },
    /// No charge exists at the given index
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityReached { max } => {
                write!(f, "max charges ({max}) reached, cannot add more charges")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "no charge at index {index} (have {len})")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// All-pairs electrostatics simulation over an owned charge collection
pub struct ChargeSim {
    params: SimParams,
    charges: Vec<Charge>,
    /// Indices into `charges` for the moving subset, in insertion order
    moving: Vec<usize>,
    paused: bool,
}

impl Default for ChargeSim {
    fn default() -> Self {
        Self::new(SimParams::default())
    }
}

impl ChargeSim {
    pub fn new(params: SimParams) -> Self {
        Self {
            params,
            charges: Vec::new(),
            moving: Vec::new(),
            paused: false,
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// All charges, in insertion order
    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Indices of the moving charges, in insertion order
    pub fn moving_indices(&self) -> &[usize] {
        &self.moving
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("simulation {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Append a charge, returning its index. At capacity the charge is
    /// dropped and the failure reported.
    pub fn add_charge(&mut self, charge: Charge) -> Result<usize, SimError> {
        if self.charges.len() >= self.params.max_charges {
            log::warn!("max charges ({}) reached, dropping charge", self.params.max_charges);
            return Err(SimError::CapacityReached {
                max: self.params.max_charges,
            });
        }

        let index = self.charges.len();
        if charge.kind() == ChargeKind::Moving {
            self.moving.push(index);
        }
        self.charges.push(charge);
        Ok(index)
    }

    /// Construct a charge in place with the engine's default mass and add it
    pub fn add_charge_at(
        &mut self,
        x: f64,
        y: f64,
        q: f64,
        kind: ChargeKind,
    ) -> Result<usize, SimError> {
        self.add_charge(Charge::new(x, y, q, kind).with_mass(self.params.default_mass))
    }

    /// Remove the charge at `index`, compacting both collections so indexing
    /// stays contiguous. Out-of-bounds indices leave everything untouched.
    pub fn remove_charge(&mut self, index: usize) -> Result<(), SimError> {
        let len = self.charges.len();
        if index >= len {
            log::warn!("remove_charge: no charge at index {index} (have {len})");
            return Err(SimError::IndexOutOfBounds { index, len });
        }

        self.charges.remove(index);
        self.moving.retain(|&moving| moving != index);
        for moving in &mut self.moving {
            if *moving > index {
                *moving -= 1;
            }
        }
        Ok(())
    }

    /// Clear both collections. The engine itself stays usable.
    pub fn reset_charges(&mut self) {
        self.charges.clear();
        self.moving.clear();
        log::debug!("cleared all charges");
    }

    /// Index of the charge closest to a point, or `None` when empty. An
    /// exact position match short-circuits the scan.
    pub fn find_closest_charge(&self, point: DVec2) -> Option<usize> {
        let mut closest = None;
        let mut min_distance = f64::INFINITY;

        for (index, charge) in self.charges.iter().enumerate() {
            if charge.position == point {
                return Some(index);
            }

            let distance = charge.distance_to(point);
            if distance < min_distance {
                closest = Some(index);
                min_distance = distance;
            }
        }

        closest
    }

    /// One physics step: clear accumulators, all-pairs force pass over the
    /// moving charges, then semi-implicit Euler integration. No-op while
    /// paused.
    pub fn update(&mut self) {
        if self.paused {
            return;
        }

        for &index in &self.moving {
            self.charges[index].clear_acceleration();
        }

        // Net force per moving charge is computed against a frozen snapshot
        // of positions, then applied, so update order cannot skew the tick.
        let mut net_forces = Vec::with_capacity(self.moving.len());
        for &index in &self.moving {
            let test = &self.charges[index];
            let mut net = Force::ZERO;

            for (other, source) in self.charges.iter().enumerate() {
                if other == index {
                    continue;
                }
                match electric_force(source, test, self.params.coulomb_constant) {
                    Ok(force) => net = net + force,
                    Err(error) => {
                        log::trace!("skipping charge pair ({other}, {index}): {error}");
                    }
                }
            }

            net_forces.push((index, net));
        }

        for (index, net) in net_forces {
            self.charges[index].apply_force(net);
        }

        for &index in &self.moving {
            self.charges[index].integrate(self.params.timestep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charge_physics::Motion;

    /// Params with friendly numbers so tests don't fight 1e9-scale constants
    fn unit_params() -> SimParams {
        SimParams {
            coulomb_constant: 1.0,
            default_mass: 1.0,
            timestep: 0.01,
            max_charges: 100,
        }
    }

    fn assert_collections_consistent(sim: &ChargeSim) {
        // Every moving index points at a moving charge...
        for &index in sim.moving_indices() {
            assert!(index < sim.len());
            assert_eq!(sim.charges()[index].kind(), ChargeKind::Moving);
        }
        // ...every moving charge is tracked exactly once, in order.
        let expected: Vec<usize> = sim
            .charges()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind() == ChargeKind::Moving)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(sim.moving_indices(), expected.as_slice());
    }

    #[test]
    fn test_add_charge_tracks_moving_subset() {
        let mut sim = ChargeSim::new(unit_params());

        sim.add_charge(Charge::stationary(0.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::moving(1.0, 0.0, -1.0)).unwrap();
        sim.add_charge(Charge::moving(2.0, 0.0, 1.0)).unwrap();

        assert_eq!(sim.len(), 3);
        assert_eq!(sim.moving_indices(), &[1, 2]);
        assert_collections_consistent(&sim);
    }

    #[test]
    fn test_capacity_reached_drops_charge() {
        let mut sim = ChargeSim::new(SimParams {
            max_charges: 2,
            ..unit_params()
        });

        sim.add_charge(Charge::moving(0.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::moving(1.0, 0.0, 1.0)).unwrap();
        let result = sim.add_charge(Charge::moving(2.0, 0.0, 1.0));

        assert_eq!(result, Err(SimError::CapacityReached { max: 2 }));
        assert_eq!(sim.len(), 2);
        assert_collections_consistent(&sim);
    }

    #[test]
    fn test_remove_charge_shifts_indices() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::moving(0.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::stationary(1.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::moving(2.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::moving(3.0, 0.0, 1.0)).unwrap();

        sim.remove_charge(2).unwrap();

        assert_eq!(sim.len(), 3);
        // Former index 3 is now 2.
        assert_eq!(sim.charges()[2].position.x, 3.0);
        assert_eq!(sim.moving_indices(), &[0, 2]);
        assert_collections_consistent(&sim);
    }

    #[test]
    fn test_remove_charge_out_of_bounds_is_harmless() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::moving(0.0, 0.0, 1.0)).unwrap();

        let result = sim.remove_charge(5);

        assert_eq!(result, Err(SimError::IndexOutOfBounds { index: 5, len: 1 }));
        assert_eq!(sim.len(), 1);
        assert_collections_consistent(&sim);
    }

    #[test]
    fn test_consistency_across_mixed_operations() {
        let mut sim = ChargeSim::new(unit_params());
        for i in 0..6 {
            let x = f64::from(i);
            if i % 2 == 0 {
                sim.add_charge(Charge::moving(x, 0.0, 1.0)).unwrap();
            } else {
                sim.add_charge(Charge::stationary(x, 0.0, 1.0)).unwrap();
            }
        }

        sim.remove_charge(0).unwrap();
        assert_collections_consistent(&sim);
        sim.remove_charge(3).unwrap();
        assert_collections_consistent(&sim);
        sim.add_charge(Charge::moving(9.0, 9.0, -1.0)).unwrap();
        assert_collections_consistent(&sim);
    }

    #[test]
    fn test_reset_charges_leaves_engine_usable() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::moving(0.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::stationary(1.0, 0.0, 1.0)).unwrap();

        sim.reset_charges();

        assert!(sim.is_empty());
        assert!(sim.moving_indices().is_empty());
        sim.add_charge(Charge::moving(2.0, 2.0, 1.0)).unwrap();
        assert_eq!(sim.len(), 1);
    }

    #[test]
    fn test_find_closest_charge() {
        let mut sim = ChargeSim::new(unit_params());
        assert_eq!(sim.find_closest_charge(DVec2::ZERO), None);

        sim.add_charge(Charge::stationary(0.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::stationary(10.0, 10.0, 1.0)).unwrap();
        sim.add_charge(Charge::stationary(3.0, 3.0, 1.0)).unwrap();

        assert_eq!(sim.find_closest_charge(DVec2::new(4.0, 4.0)), Some(2));
        // Exact position match wins outright.
        assert_eq!(sim.find_closest_charge(DVec2::new(10.0, 10.0)), Some(1));
    }

    #[test]
    fn test_like_charges_accelerate_apart() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::moving(0.0, 0.0, 1.0).with_mass(1.0))
            .unwrap();
        sim.add_charge(Charge::moving(1.0, 0.0, 1.0).with_mass(1.0))
            .unwrap();

        let initial = sim.charges()[1].position.x - sim.charges()[0].position.x;
        for _ in 0..5 {
            sim.update();
        }
        let after = sim.charges()[1].position.x - sim.charges()[0].position.x;

        assert!(after > initial);
        assert!(sim.charges()[0].velocity().x < 0.0);
        assert!(sim.charges()[1].velocity().x > 0.0);
    }

    #[test]
    fn test_opposite_charges_accelerate_together() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::moving(0.0, 0.0, 1.0).with_mass(1.0))
            .unwrap();
        sim.add_charge(Charge::moving(1.0, 0.0, -1.0).with_mass(1.0))
            .unwrap();

        for _ in 0..5 {
            sim.update();
        }
        let separation = sim.charges()[1].position.x - sim.charges()[0].position.x;

        assert!(separation < 1.0);
        assert!(sim.charges()[0].velocity().x > 0.0);
        assert!(sim.charges()[1].velocity().x < 0.0);
    }

    #[test]
    fn test_stationary_charge_never_moves() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::stationary(0.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::moving(1.0, 1.0, -1.0).with_mass(1.0))
            .unwrap();

        for _ in 0..50 {
            sim.update();
        }

        assert_eq!(sim.charges()[0].position, DVec2::ZERO);
        assert_eq!(sim.charges()[0].motion, Motion::Stationary);
    }

    #[test]
    fn test_paused_update_changes_nothing() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::moving(0.0, 0.0, 1.0).with_mass(1.0))
            .unwrap();
        sim.add_charge(Charge::moving(1.0, 0.0, -1.0).with_mass(1.0))
            .unwrap();

        sim.toggle_pause();
        assert!(sim.is_paused());

        let before: Vec<Charge> = sim.charges().to_vec();
        for _ in 0..10 {
            sim.update();
        }

        assert_eq!(sim.charges(), before.as_slice());

        sim.toggle_pause();
        assert!(!sim.is_paused());
        sim.update();
        assert_ne!(sim.charges(), before.as_slice());
    }

    #[test]
    fn test_acceleration_does_not_compound_across_ticks() {
        // Constant force field: one stationary source, one moving test
        // charge far enough away that the force barely changes per tick.
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::stationary(0.0, 0.0, 1.0)).unwrap();
        sim.add_charge(Charge::moving(1000.0, 0.0, 1.0).with_mass(1.0))
            .unwrap();

        sim.update();
        let accel_first = sim.charges()[1].acceleration().length();
        sim.update();
        let accel_second = sim.charges()[1].acceleration().length();

        // Near-constant field: if accumulators leaked across ticks the
        // second reading would be roughly double the first.
        assert!((accel_second - accel_first).abs() < accel_first * 0.01);
    }

    #[test]
    fn test_coincident_charges_do_not_poison_state() {
        let mut sim = ChargeSim::new(unit_params());
        sim.add_charge(Charge::moving(1.0, 1.0, 1.0).with_mass(1.0))
            .unwrap();
        sim.add_charge(Charge::moving(1.0, 1.0, -1.0).with_mass(1.0))
            .unwrap();

        sim.update();

        for charge in sim.charges() {
            assert!(charge.position.is_finite());
            assert!(charge.velocity().is_finite());
            // The pair is skipped, so nothing should have moved.
            assert_eq!(charge.position, DVec2::new(1.0, 1.0));
        }
    }

    #[test]
    fn test_determinism_across_runs() {
        let run = || {
            let mut sim = ChargeSim::new(unit_params());
            sim.add_charge(Charge::moving(0.0, 0.0, 1.0).with_mass(1.0))
                .unwrap();
            sim.add_charge(Charge::moving(3.0, 4.0, -2.0).with_mass(1.0))
                .unwrap();
            sim.add_charge(Charge::stationary(-2.0, 1.0, 1.5)).unwrap();
            for _ in 0..100 {
                sim.update();
            }
            sim.charges().to_vec()
        };

        let first = run();
        let second = run();

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.velocity(), b.velocity());
        }
    }

    #[test]
    fn test_moving_charge_falls_toward_opposite_stationary() {
        // SI-scale scenario: +1µC moving at (100,100), -1µC pinned at
        // (200,200), 1µg mass, dt 0.01.
        let mut sim = ChargeSim::new(SimParams::default());
        sim.add_charge(Charge::moving(100.0, 100.0, 1e-6).with_mass(1e-6))
            .unwrap();
        sim.add_charge(Charge::stationary(200.0, 200.0, -1e-6))
            .unwrap();

        sim.update();

        let mover = &sim.charges()[0];
        let shift = mover.position - DVec2::new(100.0, 100.0);

        assert!(shift.length() > 0.0);
        // Motion is along the line toward (200, 200): equal x and y shift.
        assert!((shift.x - shift.y).abs() < 1e-12);
        assert!(shift.x > 0.0);

        let toward = (DVec2::new(200.0, 200.0) - DVec2::new(100.0, 100.0)).normalize();
        let velocity_dir = mover.velocity().normalize();
        assert!(velocity_dir.dot(toward) > 0.999_999);
    }
}
