//! Fixed-timestep driver
//!
//! Wall-clock frame time accumulates into a remainder; the simulation only
//! ever advances in whole fixed steps, so results do not depend on how fast
//! frames render.

use crate::simulation::ChargeSim;

/// Accumulates frame time and converts it into fixed simulation steps
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
}

impl FixedTimestep {
    /// `step` is in the same unit as the frame times fed to [`advance`],
    /// typically seconds.
    ///
    /// [`advance`]: FixedTimestep::advance
    pub fn new(step: f64) -> Self {
        debug_assert!(step > 0.0);
        Self {
            step,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time carried over from previous frames, always in `[0, step)` after
    /// a call to [`advance`](FixedTimestep::advance)
    pub fn remainder(&self) -> f64 {
        self.accumulator
    }

    /// Feed one frame's wall-clock duration and run `sim.update()` once per
    /// whole step now contained in the accumulator. Returns how many steps
    /// ran; zero, one, or many per frame are all normal.
    pub fn advance(&mut self, sim: &mut ChargeSim, frame_time: f64) -> usize {
        self.accumulator += frame_time.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step {
            sim.update();
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}
